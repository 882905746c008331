use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use todo_api::auth::UsersAuthentication;
use todo_api::cli::Cli;
use todo_api::config::AppConfig;
use todo_api::persistence::DirectoryPersistence;
use todo_api::router::TodoRouter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so TODO_* settings can live next to the binary
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let config = Cli::parse().apply(AppConfig::from_env());

    let users = UsersAuthentication::from_json_file(&config.auth.users_file).with_context(|| {
        format!("failed to load users from {}", config.auth.users_file.display())
    })?;
    tracing::info!("loaded {} users", users.len());

    let store = DirectoryPersistence::open(&config.storage.directory)
        .await
        .with_context(|| {
            format!(
                "failed to open storage directory {}",
                config.storage.directory.display()
            )
        })?;

    let router = TodoRouter::new(
        &config.server.path_prefix,
        Arc::new(users),
        Arc::new(store.clone()),
    );
    let prefix = router.prefix().to_string();
    let app = router.into_router();

    let listener = tokio::net::TcpListener::bind(&config.server.address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.address))?;

    tracing::info!(
        "starting API server at http://{}{}, storage directory: {}",
        listener.local_addr()?,
        prefix,
        store.root().display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
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
                tracing::error!("failed to listen for SIGTERM: {}", e);
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
