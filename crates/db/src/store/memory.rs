use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{new_document_id, strip_identifiers, with_identifier, Document, DocumentStore, StoreError};

/// Process-local store keyed by collection; documents keep insertion order.
pub struct InMemoryDocumentStore {
    database_name: String,
    collections: RwLock<BTreeMap<String, Vec<(String, Document)>>>,
}

impl InMemoryDocumentStore {
    pub fn new(database_name: impl Into<String>) -> Self {
        Self { database_name: database_name.into(), collections: RwLock::new(BTreeMap::new()) }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), strip_identifiers(document)));
        Ok(id)
    }

    async fn list(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .take(limit)
                    .map(|(id, document)| with_identifier(document.clone(), id))
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.keys().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::store::{Document, DocumentStore};

    use super::InMemoryDocumentStore;

    fn document(value: serde_json::Value) -> Document {
        value.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn in_memory_store_round_trip() {
        let store = InMemoryDocumentStore::new("crm");
        let id = store
            .create("company", document(json!({"name": "Acme", "_id": "forged"})))
            .await
            .expect("create");

        let listed = store.list("company", 20).await.expect("list");
        assert_eq!(listed, vec![document(json!({"name": "Acme", "id": id}))]);
        assert_eq!(store.collection_names(10).await.expect("names"), vec!["company"]);
        assert_eq!(store.database_name(), "crm");
    }

    #[tokio::test]
    async fn in_memory_store_honours_limit() {
        let store = InMemoryDocumentStore::new("crm");
        for index in 0..4 {
            store.create("deal", document(json!({"name": index}))).await.expect("create");
        }

        assert_eq!(store.list("deal", 2).await.expect("list").len(), 2);
        assert!(store.list("deal", 0).await.expect("list").is_empty());
        assert!(store.list("missing", 5).await.expect("list").is_empty());
    }
}
