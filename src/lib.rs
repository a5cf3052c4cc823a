//! TradConnect booking engine.
//!
//! Prices and validates translator session bookings, and serves the
//! booking form's backend over HTTP/JSON.

pub mod booking;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::booking::{LoggingReservationBackend, ReservationBackend};
use crate::cache::FlowCache;
use crate::config::Config;
use crate::directory::Directory;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub directory: Directory,
    pub flows: FlowCache,
    pub backend: Arc<dyn ReservationBackend>,
}

impl AppState {
    pub fn new(config: Config, directory: Directory, backend: Arc<dyn ReservationBackend>) -> Self {
        let flows = FlowCache::new(config.max_open_flows, config.flow_idle);
        Self {
            config: Arc::new(config),
            directory,
            flows,
            backend,
        }
    }

    /// Demo directory with bookings recorded in the log
    pub fn demo(config: Config) -> Self {
        Self::new(config, Directory::demo(), Arc::new(LoggingReservationBackend))
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/translators", routes::translators::router())
        .nest("/api/booking", booking::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
