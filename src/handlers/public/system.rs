use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - API information
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Dalkom API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Photocard catalog and binder API",
            "endpoints": {
                "auth": "/auth/register, /auth/login (public), /auth/refresh (protected)",
                "catalog": "/cards, /groups, /idols, /collections (public reads, protected writes)",
                "binders": "/me/binders, /binders/:id[/cards[/:card_id]] (protected, owner only)",
                "users": "/me, /users/:id (protected)"
            }
        }
    }))
}

/// GET /health - liveness plus a database ping when Postgres is configured
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "memory" }
            })),
        );
    };

    match database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": { "status": "degraded", "timestamp": now }
                })),
            )
        }
    }
}
