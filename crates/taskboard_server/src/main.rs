//! Gateway entry point.
//!
//! # Responsibility
//! - Load config, start logging, open the store, serve until Ctrl-C.

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use taskboard_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    config.init_logging().map_err(|err| anyhow!(err))?;

    let state = AppState::open(&config.db_path)
        .with_context(|| format!("failed to open task store `{}`", config.db_path.display()))?;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=gateway status=ok addr={} db_path={}",
        config.bind,
        config.db_path.display()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server stopped with error")?;

    info!("event=server_stop module=gateway status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=gateway status=error error={err}");
        std::future::pending::<()>().await;
    }
}
