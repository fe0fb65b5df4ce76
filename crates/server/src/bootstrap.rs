use crmsuite_core::config::{AppConfig, ConfigError, LoadOptions};
use crmsuite_db::StoreHandle;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub store: StoreHandle,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    Ok(bootstrap_with_config(config).await)
}

/// An unreachable store does not abort startup; the handle records why.
pub async fn bootstrap_with_config(config: AppConfig) -> Application {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        backend = ?config.database.backend,
        "starting application bootstrap"
    );

    let store = StoreHandle::open(&config.database).await;
    info!(
        event_name = "system.bootstrap.store_ready",
        correlation_id = "bootstrap",
        connected = store.is_connected(),
        database_name = %store.database_name(),
        "document store handle constructed"
    );

    Application { config, store }
}
