use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use jobboard::router::init_router;
use jobboard::state::init_app_state;
use jobboard_config::AppConfig;
use jobboard_observability::{LoggingConfig, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing(&LoggingConfig::from_env())?;

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let state = init_app_state(&config)
        .await
        .map_err(|e| e.error.context("Failed to initialize application state"))?;

    let purge_task = state.rate_limiter.spawn_purge_task();
    let store = state.store.clone();
    let app = init_router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Server listening");
    info!("API documentation available at http://{}/api-docs", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    purge_task.abort();
    store.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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
