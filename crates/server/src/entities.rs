//! Create and list endpoints for the persisted CRM entities.
//!
//! Each route validates against the entity's descriptor before touching the
//! store; stored documents are the normalized payload with defaults filled in.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use crmsuite_core::{
    errors::ApplicationError, schema::validate_document, Activity, Company, Contact, Deal, Entity,
};
use crmsuite_db::{Document, StoreHandle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;

pub const DEFAULT_LIST_LIMIT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    pub status: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

pub fn router(store: StoreHandle) -> Router {
    Router::new()
        .route("/api/contacts", get(list_entities::<Contact>).post(create_entity::<Contact>))
        .route("/api/companies", get(list_entities::<Company>).post(create_entity::<Company>))
        .route("/api/deals", get(list_entities::<Deal>).post(create_entity::<Deal>))
        .route("/api/activities", get(list_entities::<Activity>).post(create_entity::<Activity>))
        .with_state(store)
}

pub async fn create_entity<E: Entity>(
    State(store): State<StoreHandle>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let schema = E::schema();
    let Json(payload) =
        payload.map_err(|rejection| ApiError::invalid_input(rejection.body_text(), schema.collection))?;
    let document = validate_document(schema, &payload)
        .map_err(|error| ApiError::new(ApplicationError::from(error), schema.collection))?;

    let id = store
        .create(schema.collection, document)
        .await
        .map_err(|error| ApiError::store(error, schema.collection))?;

    info!(
        event_name = "api.entity.created",
        correlation_id = %id,
        collection = schema.collection,
        "document created"
    );
    Ok(Json(CreatedResponse { id, status: "created".to_string() }))
}

pub async fn list_entities<E: Entity>(
    State(store): State<StoreHandle>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let collection = E::schema().collection;
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid_input(rejection.body_text(), collection))?;
    let limit = resolve_limit(query.limit)
        .map_err(|message| ApiError::invalid_input(message, collection))?;

    let documents =
        store.list(collection, limit).await.map_err(|error| ApiError::store(error, collection))?;
    debug!(
        event_name = "api.entity.listed",
        correlation_id = "list",
        collection,
        limit,
        returned = documents.len(),
        "documents listed"
    );
    Ok(Json(documents))
}

fn resolve_limit(requested: Option<i64>) -> Result<usize, String> {
    match requested {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(limit) => usize::try_from(limit)
            .map_err(|_| format!("`limit` must be zero or a positive integer, got {limit}")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::{Query, State},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
        Json,
    };
    use crmsuite_core::{
        config::{EnvPresence, StoreBackend},
        Contact, InterfaceError,
    };
    use crmsuite_db::{InMemoryDocumentStore, StoreHandle};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{create_entity, list_entities, resolve_limit, router, ListQuery, DEFAULT_LIST_LIMIT};

    fn memory_store() -> StoreHandle {
        StoreHandle::from_store(
            Arc::new(InMemoryDocumentStore::new("crmsuite")),
            StoreBackend::Memory,
            EnvPresence::default(),
        )
    }

    fn unavailable_store() -> StoreHandle {
        StoreHandle::unavailable(
            "DATABASE_URL is not set",
            StoreBackend::Sqlite,
            EnvPresence::default(),
            "crmsuite",
        )
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn contact_create_then_list_round_trip() {
        let store = memory_store();
        let Json(created) = create_entity::<Contact>(
            State(store.clone()),
            Ok(Json(json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}))),
        )
        .await
        .expect("create");
        assert_eq!(created.status, "created");
        assert!(!created.id.is_empty());

        let Json(listed) =
            list_entities::<Contact>(State(store), Ok(Query(ListQuery::default()))).await.expect("list");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], json!(created.id));
        assert_eq!(listed[0]["first_name"], "Ada");
        assert_eq!(listed[0]["email"], "ada@example.com");
        assert_eq!(listed[0]["status"], "lead");
    }

    #[tokio::test]
    async fn invalid_contact_is_rejected_before_the_store() {
        let store = memory_store();
        let error = create_entity::<Contact>(
            State(store.clone()),
            Ok(Json(json!({"first_name": "Ada", "last_name": "Lovelace", "status": "archived"}))),
        )
        .await
        .expect_err("invalid status");

        match error.interface() {
            InterfaceError::Unprocessable { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "status");
            }
            other => panic!("expected unprocessable, got {other:?}"),
        }
        assert_eq!(store.status().await.collections, Vec::<String>::new());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_server_error() {
        let response = router(unavailable_store())
            .oneshot(post_json("/api/contacts", json!({"first_name": "Ada", "last_name": "Lovelace"})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("DATABASE_URL is not set"));
    }

    #[tokio::test]
    async fn every_entity_route_persists_to_its_collection() {
        let store = memory_store();
        let app = router(store.clone());

        let cases = [
            ("/api/companies", json!({"name": "Acme"}), "company"),
            ("/api/deals", json!({"name": "Renewal", "amount": 1200.5}), "deal"),
            ("/api/activities", json!({"type": "call", "subject": "Intro"}), "activity"),
        ];
        for (uri, payload, collection) in cases {
            let response = app.clone().oneshot(post_json(uri, payload)).await.expect("response");
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(json_body(response).await["status"], "created");
            assert_eq!(store.list(collection, 20).await.expect("list").len(), 1, "{collection}");
        }

        let deals = store.list("deal", 20).await.expect("list");
        assert_eq!(deals[0]["stage"], "new");
    }

    #[tokio::test]
    async fn list_honours_limit_query() {
        let store = memory_store();
        for index in 0..3 {
            create_entity::<Contact>(
                State(store.clone()),
                Ok(Json(json!({"first_name": format!("c{index}"), "last_name": "Test"}))),
            )
            .await
            .expect("create");
        }
        let app = router(store);

        let response = app
            .clone()
            .oneshot(Request::get("/api/contacts?limit=2").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().expect("array").len(), 2);

        let response = app
            .oneshot(Request::get("/api/contacts?limit=0").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn bad_limit_values_are_unprocessable() {
        let app = router(memory_store());

        for uri in ["/api/contacts?limit=-1", "/api/contacts?limit=ten"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }
    }

    #[test]
    fn limit_defaults_to_twenty() {
        assert_eq!(resolve_limit(None), Ok(DEFAULT_LIST_LIMIT));
        assert_eq!(resolve_limit(Some(0)), Ok(0));
        assert!(resolve_limit(Some(-5)).is_err());
    }
}
