//! papersync-hook library interface
//!
//! Keeps a Notion paper-tracking database in sync with arXiv: a Notion
//! automation posts the changed page, the arXiv id is pulled from its
//! `Link`, and the title, authors, abstract and year are written back.

pub mod api;
pub mod error;
pub mod extractors;
pub mod models;
pub mod notion;
pub mod services;
pub mod types;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use workflow::PaperSync;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Sync pipeline with its catalog and store clients
    pub sync: Arc<PaperSync>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last webhook failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(sync: PaperSync) -> Self {
        Self {
            sync: Arc::new(sync),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::index_routes())
        .merge(api::health_routes())
        .merge(api::webhook_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
