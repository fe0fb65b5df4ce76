use axum::Router;
use crmsuite_db::StoreHandle;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{diagnostics, entities, health, insights, schema};

/// Full HTTP surface with permissive CORS for the browser front-end.
pub fn router(store: StoreHandle) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(diagnostics::router(store.clone()))
        .merge(insights::router())
        .merge(schema::router())
        .merge(entities::router(store))
        .layer(cors)
}

pub async fn serve<F>(
    bind_address: &str,
    port: u16,
    store: StoreHandle,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let address = format!("{bind_address}:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!(
        event_name = "system.http.listening",
        correlation_id = "bootstrap",
        bind_address = %address,
        "http api listening"
    );

    axum::serve(listener, router(store)).with_graceful_shutdown(shutdown).await
}
