use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route("/api", get(get_welcome))
}

/// Misc endpoint for individual use case
async fn get_health_check() -> Result<StatusCode, StatusCode>
{
    Ok(StatusCode::OK)
}

async fn get_welcome() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to FoodGuide API!" }))
}
