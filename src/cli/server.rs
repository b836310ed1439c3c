use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app::{app, AppState, Repositories};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Starts the server and blocks until Ctrl-C or SIGTERM.
pub async fn serve(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    config.validate()?;
    let port = port.unwrap_or(config.api.port);

    let database = match config.database.url {
        Some(_) => {
            let database = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to DATABASE_URL")?;
            database.ensure_schema().await?;
            Some(database)
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store, data is lost on exit");
            None
        }
    };
    let repositories = match &database {
        Some(database) => Repositories::postgres(database),
        None => Repositories::in_memory(),
    };

    let state = AppState::new(config, repositories, database.clone());
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!("Dalkom API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(database) = database {
        database.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
