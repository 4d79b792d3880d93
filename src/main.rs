use std::sync::Arc;

use allonscinoche::{
    AppState,
    config::{Config, StoreKind},
    db, routes,
    store::{MemoryStore, SqlStore, Store},
};
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,allonscinoche=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match config.store {
        StoreKind::Sql => {
            let db = db::connect_and_migrate(&config.database_url).await?;
            Arc::new(SqlStore::new(db))
        },
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!(store = ?config.store, "store selected");

    let app = routes::router(Arc::new(AppState::new(store)));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
