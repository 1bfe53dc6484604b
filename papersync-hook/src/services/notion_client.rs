//! Notion pages API client
//!
//! Only `PATCH /v1/pages/{page_id}` is used.

use crate::notion::UpdatePageRequest;
use crate::types::{DocumentStore, StoreError};
use papersync_common::config::NotionConfig;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, info};

/// Notion API client
pub struct NotionClient {
    http_client: Client,
    base_url: String,
}

impl NotionClient {
    pub fn new(
        token: &str,
        base_url: impl Into<String>,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| StoreError::Config(format!("Invalid Notion token: {}", e)))?;
        auth.set_sensitive(true);

        let version = header::HeaderValue::from_str(api_version)
            .map_err(|e| StoreError::Config(format!("Invalid Notion-Version: {}", e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert("Notion-Version", version);

        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &NotionConfig, token: &str) -> Result<Self, StoreError> {
        Self::new(
            token,
            config.api_base_url.clone(),
            &config.api_version,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl DocumentStore for NotionClient {
    async fn update_page(&self, request: &UpdatePageRequest) -> Result<(), StoreError> {
        let url = format!("{}/pages/{}", self.base_url, request.page_id);
        debug!(page_id = %request.page_id, url = %url, "Updating Notion page");

        let response = self
            .http_client
            .patch(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("Notion API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            page_id = %request.page_id,
            properties = request.properties.len(),
            "Notion page updated"
        );
        Ok(())
    }
}
