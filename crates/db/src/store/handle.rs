use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crmsuite_core::config::{DatabaseConfig, EnvPresence, StoreBackend};

use super::{Document, DocumentStore, InMemoryDocumentStore, SqlDocumentStore, StoreError};
use crate::{connect_with_settings, migrations};

/// Upper bound on collection names reported by [`StoreHandle::status`].
pub const MAX_SAMPLED_COLLECTIONS: usize = 10;
/// Longest collection-listing error kept in a status report.
pub const MAX_STATUS_ERROR_CHARS: usize = 50;

pub const MISSING_URL_REASON: &str = "DATABASE_URL is not set";

/// Reason a `DATABASE_URL` cannot back the SQL store, if any.
///
/// Only the scheme is echoed so credentials in the URL stay out of logs.
pub fn unsupported_url_reason(url: &str) -> Option<String> {
    let url = url.trim();
    if url.starts_with("sqlite:") || url == ":memory:" {
        return None;
    }
    let scheme = match url.split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => scheme,
        _ => "<none>",
    };
    Some(format!("unsupported DATABASE_URL scheme `{scheme}`; expected sqlite"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigPresence {
    Set,
    NotSet,
    NotApplicable,
}

impl ConfigPresence {
    fn for_backend(backend: StoreBackend, present: bool) -> Self {
        match (backend, present) {
            (StoreBackend::Memory, _) => Self::NotApplicable,
            (StoreBackend::Sqlite, true) => Self::Set,
            (StoreBackend::Sqlite, false) => Self::NotSet,
        }
    }
}

/// Point-in-time view of the store, safe to build from any handle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub backend: StoreBackend,
    pub connected: bool,
    pub database_name: String,
    pub url: ConfigPresence,
    pub name: ConfigPresence,
    pub collections: Vec<String>,
    pub collections_error: Option<String>,
    pub unavailable_reason: Option<String>,
}

#[derive(Clone)]
enum StoreState {
    Connected(Arc<dyn DocumentStore>),
    Unavailable { reason: String },
}

/// Process-wide store handle constructed once at startup.
///
/// A handle whose connection could not be established stays usable: every
/// operation fails with [`StoreError::Unavailable`] and `status` reports why.
#[derive(Clone)]
pub struct StoreHandle {
    state: StoreState,
    backend: StoreBackend,
    env_presence: EnvPresence,
    database_name: String,
}

impl StoreHandle {
    pub async fn open(config: &DatabaseConfig) -> Self {
        let database_name = config.store_name().to_string();
        let state = match config.backend {
            StoreBackend::Memory => StoreState::Connected(Arc::new(InMemoryDocumentStore::new(
                database_name.clone(),
            ))),
            StoreBackend::Sqlite => match config.url_value() {
                None => StoreState::Unavailable { reason: MISSING_URL_REASON.to_string() },
                Some(url) => match unsupported_url_reason(url) {
                    Some(reason) => StoreState::Unavailable { reason },
                    None => match open_sql(url, config, &database_name).await {
                        Ok(store) => StoreState::Connected(Arc::new(store)),
                        Err(reason) => StoreState::Unavailable { reason },
                    },
                },
            },
        };

        match &state {
            StoreState::Connected(_) => info!(
                event_name = "system.store.connected",
                correlation_id = "bootstrap",
                backend = ?config.backend,
                database_name = %database_name,
                "document store connected"
            ),
            StoreState::Unavailable { reason } => warn!(
                event_name = "system.store.unavailable",
                correlation_id = "bootstrap",
                backend = ?config.backend,
                database_name = %database_name,
                reason = %reason,
                "document store unavailable; persistence endpoints will fail"
            ),
        }

        Self { state, backend: config.backend, env_presence: config.env_presence, database_name }
    }

    pub fn from_store(
        store: Arc<dyn DocumentStore>,
        backend: StoreBackend,
        env_presence: EnvPresence,
    ) -> Self {
        let database_name = store.database_name().to_string();
        Self { state: StoreState::Connected(store), backend, env_presence, database_name }
    }

    pub fn unavailable(
        reason: impl Into<String>,
        backend: StoreBackend,
        env_presence: EnvPresence,
        database_name: impl Into<String>,
    ) -> Self {
        Self {
            state: StoreState::Unavailable { reason: reason.into() },
            backend,
            env_presence,
            database_name: database_name.into(),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, StoreState::Connected(_))
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        self.store()?.create(collection, document).await
    }

    pub async fn list(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError> {
        self.store()?.list(collection, limit).await
    }

    /// Never fails; listing errors are captured in the report.
    pub async fn status(&self) -> StoreStatus {
        let mut status = StoreStatus {
            backend: self.backend,
            connected: false,
            database_name: self.database_name.clone(),
            url: ConfigPresence::for_backend(self.backend, self.env_presence.database_url),
            name: ConfigPresence::for_backend(self.backend, self.env_presence.database_name),
            collections: Vec::new(),
            collections_error: None,
            unavailable_reason: None,
        };

        match &self.state {
            StoreState::Unavailable { reason } => status.unavailable_reason = Some(reason.clone()),
            StoreState::Connected(store) => {
                status.connected = true;
                match store.collection_names(MAX_SAMPLED_COLLECTIONS).await {
                    Ok(mut names) => {
                        names.truncate(MAX_SAMPLED_COLLECTIONS);
                        status.collections = names;
                    }
                    Err(error) => {
                        status.collections_error =
                            Some(error.to_string().chars().take(MAX_STATUS_ERROR_CHARS).collect());
                    }
                }
            }
        }

        status
    }

    fn store(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        match &self.state {
            StoreState::Connected(store) => Ok(store),
            StoreState::Unavailable { reason } => Err(StoreError::Unavailable(reason.clone())),
        }
    }
}

async fn open_sql(
    url: &str,
    config: &DatabaseConfig,
    database_name: &str,
) -> Result<SqlDocumentStore, String> {
    let pool = connect_with_settings(url, config.max_connections, config.timeout_secs)
        .await
        .map_err(|error| format!("database connection failed: {error}"))?;
    migrations::run_pending(&pool)
        .await
        .map_err(|error| format!("database migration failed: {error}"))?;
    Ok(SqlDocumentStore::new(pool, database_name))
}
