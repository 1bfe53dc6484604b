//! HTTP API handlers
//!
//! - `GET /`: service banner
//! - `GET|POST /health`: liveness and diagnostics
//! - `POST /webhook`: Notion automation webhook

pub mod health;
pub mod index;
pub mod webhook;

pub use health::health_routes;
pub use index::index_routes;
pub use webhook::webhook_routes;
