use std::net::SocketAddr;

use ghibli_api::{app::env::Envy, create_router, AppState};
use tokio::signal;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "ghibli_api=debug,tower_http=info";

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(%e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(%e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // environment
    let envy = match Envy::load() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };
    tracing::info!(app_env = %envy.app_env, "loaded environment");
    envy.log_missing_values();

    // properties
    let port = envy.port();
    let state = AppState::from_envy(&envy);

    // app
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server = match axum::Server::try_bind(&addr) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!(%e, "failed to bind {}", addr);
            return;
        }
    };

    tracing::info!("listening on {}", addr);

    if let Err(e) = server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%e, "server error");
    }
}
