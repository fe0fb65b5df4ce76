use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

pub const SERVICE_NAME: &str = "crmsuite-server";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checked_at: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/health", get(health))
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse { message: "AI CRM Suite Backend is running" })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Hello from the AI CRM backend API!" })
}

/// Liveness only; store reachability is reported by `/test`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        checked_at: Utc::now().to_rfc3339(),
    })
}
