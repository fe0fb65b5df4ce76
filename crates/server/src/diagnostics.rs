use axum::{extract::State, routing::get, Json, Router};
use crmsuite_db::{ConfigPresence, StoreHandle, StoreStatus};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl From<StoreStatus> for DiagnosticsResponse {
    fn from(status: StoreStatus) -> Self {
        let database = match (&status.unavailable_reason, &status.collections_error) {
            (Some(reason), _) => format!("❌ Not Available: {reason}"),
            (None, Some(error)) => format!("⚠️  Connected but Error: {error}"),
            (None, None) => "✅ Connected & Working".to_string(),
        };

        Self {
            backend: "✅ Running".to_string(),
            database,
            database_url: presence_label(status.url).to_string(),
            database_name: presence_label(status.name).to_string(),
            connection_status: if status.connected { "Connected" } else { "Not Connected" }
                .to_string(),
            collections: status.collections,
        }
    }
}

fn presence_label(presence: ConfigPresence) -> &'static str {
    match presence {
        ConfigPresence::Set => "✅ Set",
        ConfigPresence::NotSet => "❌ Not Set",
        ConfigPresence::NotApplicable => "➖ Not Applicable",
    }
}

pub fn router(store: StoreHandle) -> Router {
    Router::new().route("/test", get(store_diagnostics)).with_state(store)
}

pub async fn store_diagnostics(State(store): State<StoreHandle>) -> Json<DiagnosticsResponse> {
    let status = store.status().await;
    debug!(
        event_name = "api.diagnostics.reported",
        correlation_id = "diagnostics",
        connected = status.connected,
        sampled_collections = status.collections.len(),
        "store diagnostics reported"
    );
    Json(DiagnosticsResponse::from(status))
}
