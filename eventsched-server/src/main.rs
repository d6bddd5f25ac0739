use anyhow::{Context, Result};

use eventsched_core::{Settings, StorageKind};
use eventsched_server::{AppState, app, logging, singleton};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init_tracing(&settings.log_level);

    // Only one instance may write to a file store
    let _lock = match settings.storage {
        StorageKind::File => Some(singleton::acquire_lock(&settings.data_path())?),
        StorageKind::Memory => None,
    };

    let state = AppState::from_settings(&settings)?;

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        storage = ?settings.storage,
        data_dir = %settings.data_path().display(),
        "eventsched-server listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("eventsched-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
