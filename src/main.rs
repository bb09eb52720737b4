use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;

mod config;
mod controllers;
mod errors;
mod extractors;
mod middleware;
mod models;
mod routes;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let config = config::Config::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!(
        "environment: {} (development: {})",
        config.environment,
        config.is_development()
    );

    let state = models::AppState::new(store::MemoryStore::seeded(), config);
    let app = routes::build_app(routes::get_routes(), state);

    log::info!("listening on {}", addr);
    axum::Server::try_bind(&addr)
        .with_context(|| format!("could not bind {addr}"))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
