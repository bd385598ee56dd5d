use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use crate::config::Config;
use crate::controller::AppState;
use crate::repositories::google_places_repo::GooglePlacesRepo;

pub mod config;
pub mod controller;
pub mod errors;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    let places_settings = config
        .places_settings()
        .context("Invalid places provider configuration")?;
    let media_timeout = places_settings.timeout;

    let places_repo = GooglePlacesRepo::new(places_settings)
        .context("Failed to build places provider client")?;

    info!("Starting FoodGuide API in {} mode", config.environment);
    controller::serve(
        AppState {
            places_repo: Arc::new(places_repo),
            media_timeout,
        },
        &config,
    ).await
}
