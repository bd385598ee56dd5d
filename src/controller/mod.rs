use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::PlacesApi;

pub mod health_check;
pub mod restaurant_controller;

/// Shared handles every controller router is built from.
#[derive(Clone)]
pub struct AppState {
    pub places_repo: Arc<dyn PlacesApi>,
    pub media_timeout: Duration,
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let allow_origin = if config.origin_urls.trim() == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(&config.origin_urls))
    };

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::OPTIONS
                        ])
                        .allow_origin(allow_origin)
                        .allow_headers([CONTENT_TYPE])
                )
                .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        );

    let address = SocketAddr::new(config.host, config.port);
    info!("API server listening on: {}", address);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

fn parse_origins(origin_urls: &str) -> Vec<HeaderValue> {
    origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Skipping invalid CORS origin {}: {}", s, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>()
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .merge(restaurant_controller::router(app_state))
        .fallback(page_not_found_handler)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
