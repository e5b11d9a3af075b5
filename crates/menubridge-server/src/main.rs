mod api;
mod cache;
mod error;
mod middleware;
mod service;

use std::sync::Arc;

use menubridge_square::SquareClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    service::CatalogService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = menubridge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.square_access_token.is_none() {
        tracing::warn!(
            "SQUARE_ACCESS_TOKEN not set; Square-backed endpoints will respond with CONFIG_ERROR"
        );
    }

    let client = SquareClient::new(
        config.square_access_token.as_deref(),
        config.square_environment,
        config.square_timeout_secs,
    )?;
    let catalog = Arc::new(CatalogService::new(client, config.cache));
    let app = build_app(AppState { catalog });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        square_environment = %config.square_environment,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        cache_max_entries = config.cache.max_entries,
        "API server started"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
