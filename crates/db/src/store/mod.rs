//! Document store adapter.
//!
//! Collections hold schemaless JSON documents. The adapter owns identifiers:
//! it assigns an opaque id on `create` and hands it back as a plain `id`
//! string field on `list`, stripping any internal identifier field.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crmsuite_core::errors::ApplicationError;

pub mod handle;
pub mod memory;
pub mod sql;

pub use handle::{unsupported_url_reason, ConfigPresence, StoreHandle, StoreStatus};
pub use memory::InMemoryDocumentStore;
pub use sql::SqlDocumentStore;

pub type Document = Map<String, Value>;

/// Field name callers see the identifier under.
pub const ID_FIELD: &str = "id";
/// Internal identifier representations that never leave the adapter.
pub const INTERNAL_ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store is not connected: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl StoreError {
    /// Connection-level failures, as opposed to a failed operation on a live store.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Database(error) => matches!(
                error,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            Self::Encode(_) | Self::Decode(_) => false,
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        if error.is_unavailable() {
            Self::StoreUnavailable(error.to_string())
        } else {
            Self::Store(error.to_string())
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Logical database the collections live in.
    fn database_name(&self) -> &str;

    /// Persist `document` and return its newly assigned identifier.
    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Up to `limit` documents in insertion order, each carrying its `id`.
    async fn list(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError>;

    /// Up to `limit` names of collections holding at least one document.
    async fn collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError>;
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Drop caller-supplied identifier fields before persisting.
pub(crate) fn strip_identifiers(mut document: Document) -> Document {
    document.remove(ID_FIELD);
    document.remove(INTERNAL_ID_FIELD);
    document
}

/// Attach the adapter-owned identifier to a stored body.
pub(crate) fn with_identifier(mut document: Document, id: &str) -> Document {
    document.remove(INTERNAL_ID_FIELD);
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    document
}
