use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use crmsuite_agent::{Insights, InsightsEngine};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;

const OPERATION: &str = "insights.generate";

pub fn router() -> Router {
    Router::new().route("/api/ai/insights", post(generate_insights))
}

pub async fn generate_insights(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Insights>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::invalid_input(rejection.body_text(), OPERATION))?;
    let text = payload
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::invalid_input("`text` is required and must be a string", OPERATION))?;

    let insights = InsightsEngine::new().analyze(text);
    info!(
        event_name = "api.insights.generated",
        correlation_id = "insights",
        sentiment = insights.sentiment.as_str(),
        action_items = insights.action_items.len(),
        "insights generated"
    );
    Ok(Json(insights))
}
