//! statforge-api: serve the health endpoints on `API_BIND`.

use anyhow::{Context, Result};
use log::info;

use statforge_api::{create_router, AppState, Database};
use statforge_core::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load(None).context("load settings")?;
    let db = Database::connect(&settings);
    let app = create_router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(&settings.api_bind)
        .await
        .with_context(|| format!("bind {}", settings.api_bind))?;
    info!("StatForge API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("StatForge API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
