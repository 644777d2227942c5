//! # dynamodb-rest
//!
//! Loads configuration, installs logging, builds the shared store once and
//! serves the items and users API until interrupted.

use dynamodb_rest::{
    config::{Config, StoreBackend},
    logging, router, server,
    store::{DynamoStore, MemoryStore, Store},
};

use std::sync::Arc;
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(&config.log_filter, config.log_format)?;
    let tables = config.tables();
    tracing::info!(
        items_table = %tables.items,
        users_table = %tables.users,
        store = ?config.store,
        "starting"
    );

    match config.store {
        StoreBackend::Dynamodb => {
            let store = DynamoStore::from_env(config.dynamodb_endpoint.as_deref())
                .await
                .with_consistent_read(config.consistent_read)
                .with_scan_page_size(config.scan_page_size);
            serve(router::Router::new(Arc::new(store), tables), &config.bind_addr).await
        }
        StoreBackend::Memory => {
            let store = MemoryStore::new()
                .with_table(tables.items.clone(), "itemId")
                .with_table(tables.users.clone(), "userId");
            serve(router::Router::new(Arc::new(store), tables), &config.bind_addr).await
        }
    }
}

async fn serve<S: Store>(
    router: router::Router<S>,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, server::app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
