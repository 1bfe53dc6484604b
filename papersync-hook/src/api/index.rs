//! Service banner

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "ArXiv Webhook Service".to_string(),
    })
}

pub fn index_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
