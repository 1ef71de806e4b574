//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use extractor::{Extractor, HttpFetcher};

use crate::server::routes::{analyze_handler, health_handler, proxy_download_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor<HttpFetcher>>,
    pub proxy_client: reqwest::Client,
}

/// Build the application router with all routes and middleware
pub fn build_app(fetch_timeout: Duration) -> Router {
    let state = AppState {
        extractor: Arc::new(Extractor::new(HttpFetcher::with_timeout(fetch_timeout))),
        proxy_client: reqwest::Client::new(),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/proxy_download", get(proxy_download_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
