//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // O .env precisa estar carregado antes do logger ler RUST_LOG.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new().await?;
    let bind_addr = app_state.settings.bind_addr.clone();

    let app = app::build_router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", bind_addr);
    tracing::info!("📖 Documentação em http://{}/api/docs", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
