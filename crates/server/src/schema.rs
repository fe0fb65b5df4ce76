use axum::{routing::get, Json, Router};
use crmsuite_core::schema::export_all;
use serde_json::{Map, Value};

pub fn router() -> Router {
    Router::new().route("/schema", get(schema))
}

/// Entity descriptors for form builders, keyed by lowercase entity name.
pub async fn schema() -> Json<Map<String, Value>> {
    Json(export_all())
}

#[cfg(test)]
mod tests {
    use axum::Json;

    use super::schema;

    #[tokio::test]
    async fn schema_lists_every_entity() {
        let Json(exported) = schema().await;

        for entity in ["company", "contact", "deal", "activity", "user", "product"] {
            assert_eq!(exported[entity]["type"], "object", "descriptor for `{entity}`");
        }
        assert_eq!(exported["activity"]["required"], serde_json::json!(["type", "subject"]));
    }
}
