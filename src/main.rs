mod app;
mod classifier;
mod domain;
mod error;
mod game;
mod models;
mod shared;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::app::AppState;
use crate::classifier::RoboflowClient;
use crate::game::TableManager;
use crate::shared::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::parse();

    let classifier = Arc::new(RoboflowClient::new(
        config.classifier_url.clone(),
        config.classifier_model.clone(),
        config.classifier_api_key.clone(),
        config.classifier_timeout(),
    )?);

    let manager_tx = TableManager::start(config.duplicate_policy, config.dealer_policy);

    let app = app::create_routes(AppState { manager_tx, classifier });

    tracing::info!(
        addr = %config.bind,
        duplicate_policy = ?config.duplicate_policy,
        dealer_policy = ?config.dealer_policy,
        "starting server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("received shutdown signal");
}
