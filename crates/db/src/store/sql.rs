use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::Row;

use super::{new_document_id, strip_identifiers, with_identifier, Document, DocumentStore, StoreError};
use crate::DbPool;

/// Documents persisted as JSON text rows in the `document` table.
pub struct SqlDocumentStore {
    pool: DbPool,
    database_name: String,
}

impl SqlDocumentStore {
    pub fn new(pool: DbPool, database_name: impl Into<String>) -> Self {
        Self { pool, database_name: database_name.into() }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqlDocumentStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        let body = serde_json::to_string(&Value::Object(strip_identifiers(document)))
            .map_err(|error| StoreError::Encode(error.to_string()))?;

        sqlx::query(
            "INSERT INTO document (id, database_name, collection, body_json, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&self.database_name)
        .bind(collection)
        .bind(&body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            "SELECT id, body_json FROM document
             WHERE database_name = ? AND collection = ?
             ORDER BY seq ASC
             LIMIT ?",
        )
        .bind(&self.database_name)
        .bind(collection)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let body: String = row.try_get("body_json")?;
                let document = match serde_json::from_str::<Value>(&body) {
                    Ok(Value::Object(document)) => document,
                    Ok(other) => {
                        return Err(StoreError::Decode(format!(
                            "document `{id}` is not a JSON object: {other}"
                        )))
                    }
                    Err(error) => {
                        return Err(StoreError::Decode(format!("document `{id}`: {error}")))
                    }
                };
                Ok(with_identifier(document, &id))
            })
            .collect()
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT collection FROM document
             WHERE database_name = ?
             ORDER BY collection
             LIMIT ?",
        )
        .bind(&self.database_name)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
