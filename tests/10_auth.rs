mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::TestServer;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server.send(Method::GET, "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "memory");
    Ok(())
}

#[tokio::test]
async fn register_login_and_me() -> Result<()> {
    let server = TestServer::start().await?;
    let (user_id, token) = server.sign_up("  Winter@Example.com ", "Winter").await?;

    let (status, body) = server.send(Method::GET, "/me", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["email"], "winter@example.com");
    assert_eq!(body["data"]["username"], "winter");
    assert!(body["data"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_differing_in_case_conflicts() -> Result<()> {
    let server = TestServer::start().await?;
    server.sign_up("A@x.com", "first").await?;

    let (status, body) = server
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "a@x.com", "username": "second", "password": "password123" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;
    server.sign_up("karina@x.com", "karina").await?;

    let (status, body) = server
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "karina@x.com", "password": "not-the-password" })),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = server.send(Method::GET, "/me/binders", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = server.send(Method::GET, "/me", Some("not-a-token"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn refresh_issues_a_working_token() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.sign_up("ningning@x.com", "ningning").await?;

    let (status, body) = server.send(Method::POST, "/auth/refresh", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["data"]["token"].as_str().unwrap_or_default().to_string();
    assert!(body["data"]["expires_at"].is_string());

    let (status, _) = server.send(Method::GET, "/me", Some(&fresh), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn users_may_only_update_themselves() -> Result<()> {
    let server = TestServer::start().await?;
    let (alice_id, alice_token) = server.sign_up("alice@x.com", "alice").await?;
    let (_, bob_token) = server.sign_up("bob@x.com", "bobby").await?;

    let changes = json!({ "email": "alice@x.com", "username": "alice_new" });
    let path = format!("/users/{alice_id}");

    let (status, _) = server.send(Method::PUT, &path, Some(&bob_token), Some(changes.clone())).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server.send(Method::PUT, &path, Some(&alice_token), Some(changes)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice_new");

    let (status, body) = server.send(Method::GET, &path, Some(&bob_token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice_new");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let server = TestServer::start().await?;
    let res = server
        .request(Method::POST, "/auth/register", None)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
