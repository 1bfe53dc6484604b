//! Notion automation webhook
//!
//! The automation posts the changed page as `{"source": ..., "data": <page>}`.
//! The handler runs the sync pipeline to completion before answering.

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: String,
    pub page_id: String,
    pub arxiv_id: String,
}

/// POST /webhook
///
/// **Errors:**
/// - 400: malformed payload, schema mismatch, or a Link that is not an arXiv URL
/// - 404: arXiv has no such paper
/// - 502: arXiv or Notion could not be reached or refused the call
/// - 500: internal precondition failure
pub async fn receive_webhook(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<WebhookResponse>> {
    debug!(payload = %payload, "Webhook payload received");

    match state.sync.handle_payload(&payload).await {
        Ok(outcome) => Ok(Json(WebhookResponse {
            message: "Webhook received".to_string(),
            page_id: outcome.page_id,
            arxiv_id: outcome.arxiv_id,
        })),
        Err(err) => {
            error!(error = %err, "Webhook processing failed");
            *state.last_error.write().await = Some(err.to_string());
            Err(err.into())
        }
    }
}

pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(receive_webhook))
}
