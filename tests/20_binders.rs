mod common;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

async fn create_binder(server: &TestServer, token: &str, body: Value) -> Result<Value> {
    let (status, body) = server.send(Method::POST, "/binders", Some(token), Some(body)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create binder failed: {status} {body}");
    Ok(body["data"].clone())
}

fn card_ids(binder: &Value) -> Vec<String> {
    binder["card_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|id| id.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn create_ignores_client_supplied_owner() -> Result<()> {
    let server = TestServer::start().await?;
    let (user_id, token) = server.sign_up("owner@x.com", "owner").await?;

    let binder = create_binder(&server, &token, json!({ "name": "Mine", "owner_id": "someone-else" })).await?;
    assert_eq!(binder["owner_id"], user_id.as_str());
    assert!(binder["id"].as_str().is_some_and(|id| !id.is_empty()));
    Ok(())
}

#[tokio::test]
async fn other_users_get_forbidden_not_content() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, owner) = server.sign_up("owner@x.com", "owner").await?;
    let (_, intruder) = server.sign_up("intruder@x.com", "intruder").await?;

    let binder = create_binder(&server, &owner, json!({ "name": "Private", "card_ids": ["k1"] })).await?;
    let id = binder["id"].as_str().context("missing id")?;

    let requests = [
        (Method::GET, format!("/binders/{id}"), None),
        (Method::GET, format!("/binders/{id}/cards"), None),
        (Method::PUT, format!("/binders/{id}"), Some(json!({ "name": "Stolen" }))),
        (Method::PATCH, format!("/binders/{id}/cards/k2"), None),
        (Method::DELETE, format!("/binders/{id}/cards/k1"), None),
        (Method::DELETE, format!("/binders/{id}"), None),
    ];
    for (method, path, body) in requests {
        let (status, response) = server.send(method.clone(), &path, Some(&intruder), body).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {path}");
        assert!(response.get("data").is_none(), "{method} {path} leaked data");
    }

    let (status, body) = server.send(Method::GET, &format!("/binders/{id}"), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Private");
    assert_eq!(card_ids(&body["data"]), vec!["k1"]);
    Ok(())
}

#[tokio::test]
async fn missing_binder_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("owner@x.com", "owner").await?;

    let (status, body) = server.send(Method::GET, "/binders/does-not-exist", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn listing_is_scoped_filtered_and_paged() -> Result<()> {
    let server = TestServer::start().await?;
    let (user_id, me) = server.sign_up("me@x.com", "mememe").await?;
    let (other_id, other) = server.sign_up("other@x.com", "other").await?;

    for n in 1..=5 {
        create_binder(&server, &me, json!({ "name": format!("B{n}"), "is_favorite": n % 2 == 0 })).await?;
    }
    create_binder(&server, &other, json!({ "name": "Theirs" })).await?;

    let (status, body) = server
        .send(Method::GET, &format!("/me/binders?owner_id={other_id}"), Some(&me), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().context("expected array")?;
    assert_eq!(listed.len(), 5);
    assert!(listed.iter().all(|b| b["owner_id"] == user_id.as_str()));

    let (_, body) = server.send(Method::GET, "/me/binders?offset=2&limit=1", Some(&me), None).await?;
    let page = body["data"].as_array().context("expected array")?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "B3");

    let (_, body) = server.send(Method::GET, "/me/binders?is_favorite=true", Some(&me), None).await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    // An unparsable boolean is ignored rather than rejected.
    let (status, body) = server.send(Method::GET, "/me/binders?is_favorite=maybe", Some(&me), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn bad_pagination_is_a_validation_error() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("me@x.com", "mememe").await?;

    for query in ["limit=ten", "offset=-1", "offset=abc"] {
        let (status, body) = server.send(Method::GET, &format!("/me/binders?{query}"), Some(&token), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    Ok(())
}

#[tokio::test]
async fn bad_enriched_flag_uses_error_envelope() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("flag@x.com", "flagger").await?;
    let binder = create_binder(&server, &token, json!({ "name": "Flags" })).await?;
    let id = binder["id"].as_str().context("binder id")?;

    let (status, body) = server
        .send(Method::GET, &format!("/binders/{id}/cards?enriched=yes"), Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn favorite_filter_accepts_numeric_flags() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("fav@x.com", "favfan").await?;
    create_binder(&server, &token, json!({ "name": "Loved", "is_favorite": true })).await?;
    create_binder(&server, &token, json!({ "name": "Plain" })).await?;

    let (status, body) = server.send(Method::GET, "/me/binders?is_favorite=1", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"].as_array().context("list")?.iter().filter_map(|b| b["name"].as_str()).collect();
    assert_eq!(names, vec!["Loved"]);
    Ok(())
}

#[tokio::test]
async fn card_membership_keeps_order() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("me@x.com", "mememe").await?;

    let binder = create_binder(&server, &token, json!({ "name": "Seq", "card_ids": ["a", "b", "a"] })).await?;
    let id = binder["id"].as_str().context("missing id")?;

    let (status, body) = server.send(Method::PATCH, &format!("/binders/{id}/cards/c"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_ids(&body["data"]), vec!["a", "b", "a", "c"]);

    let (_, body) = server.send(Method::DELETE, &format!("/binders/{id}/cards/c"), Some(&token), None).await?;
    assert_eq!(card_ids(&body["data"]), vec!["a", "b", "a"]);

    let (_, body) = server.send(Method::DELETE, &format!("/binders/{id}/cards/a"), Some(&token), None).await?;
    assert_eq!(card_ids(&body["data"]), vec!["b", "a"]);

    let (status, body) = server.send(Method::DELETE, &format!("/binders/{id}/cards/zzz"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_ids(&body["data"]), vec!["b", "a"]);
    Ok(())
}

#[tokio::test]
async fn update_replaces_fields_but_not_owner_or_cards() -> Result<()> {
    let server = TestServer::start().await?;
    let (user_id, token) = server.sign_up("me@x.com", "mememe").await?;

    let binder = create_binder(
        &server,
        &token,
        json!({ "name": "Old", "description": "first", "card_ids": ["a"] }),
    )
    .await?;
    let id = binder["id"].as_str().context("missing id")?;

    let (status, body) = server
        .send(
            Method::PUT,
            &format!("/binders/{id}"),
            Some(&token),
            Some(json!({ "name": "New", "owner_id": "hijack", "card_ids": ["x"], "is_favorite": true })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "New");
    assert_eq!(body["data"]["description"], "");
    assert_eq!(body["data"]["is_favorite"], true);
    assert_eq!(body["data"]["owner_id"], user_id.as_str());
    assert_eq!(card_ids(&body["data"]), vec!["a"]);
    Ok(())
}

#[tokio::test]
async fn delete_returns_removed_binder() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("me@x.com", "mememe").await?;

    let binder = create_binder(&server, &token, json!({ "name": "Gone" })).await?;
    let id = binder["id"].as_str().context("missing id")?;

    let (status, body) = server.send(Method::DELETE, &format!("/binders/{id}"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gone");

    let (status, _) = server.send(Method::GET, &format!("/binders/{id}"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
