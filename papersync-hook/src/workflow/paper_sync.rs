//! Paper sync pipeline
//!
//! payload → decode → extract arXiv id → catalog lookup → attach page id →
//! build update → store update
//!
//! Each step produces a new value; any failure ends the run before the
//! store is touched, so a page is either fully updated or not at all.

use crate::extractors::extract_arxiv_id;
use crate::models::PaperRecord;
use crate::notion::{MapError, PaperMapper};
use crate::types::{CatalogError, CatalogLookup, DocumentStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Pipeline failures
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Mapping(#[from] MapError),

    #[error("Invalid arXiv URL: '{0}'")]
    InvalidIdentifierUrl(String),

    #[error("Catalog lookup for {identifier} failed: {source}")]
    Catalog {
        identifier: String,
        #[source]
        source: CatalogError,
    },

    #[error("Document store update failed: {0}")]
    Store(#[from] StoreError),
}

/// Result of one successful run
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub page_id: String,
    pub arxiv_id: String,
    /// Record as written (carries the page id)
    pub paper: PaperRecord,
    pub properties_written: usize,
}

/// Sync workflow bound to one catalog and one document store
pub struct PaperSync {
    mapper: PaperMapper,
    catalog: Arc<dyn CatalogLookup>,
    store: Arc<dyn DocumentStore>,
}

impl PaperSync {
    pub fn new(catalog: Arc<dyn CatalogLookup>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            mapper: PaperMapper::new(),
            catalog,
            store,
        }
    }

    pub fn mapper(&self) -> &PaperMapper {
        &self.mapper
    }

    /// Run the pipeline for a raw webhook body
    pub async fn handle_payload(&self, payload: &Value) -> Result<SyncOutcome, SyncError> {
        let tracked = self.mapper.parse_payload(payload)?;
        self.sync_record(tracked).await
    }

    /// Run the pipeline for an already decoded page
    pub async fn sync_record(&self, tracked: PaperRecord) -> Result<SyncOutcome, SyncError> {
        let page_id = tracked.record_id.clone().ok_or(MapError::MissingRecordId)?;
        info!(page_id = %page_id, url = %tracked.url, "Syncing tracked paper");

        let arxiv_id = extract_arxiv_id(&tracked.url).ok_or_else(|| {
            warn!(page_id = %page_id, url = %tracked.url, "Link is not an arXiv abs/pdf URL");
            SyncError::InvalidIdentifierUrl(tracked.url.clone())
        })?;

        let fetched = self
            .catalog
            .fetch(arxiv_id.as_str())
            .await
            .map_err(|source| {
                warn!(
                    page_id = %page_id,
                    arxiv_id = %arxiv_id,
                    catalog = self.catalog.name(),
                    transient = source.is_transient(),
                    error = %source,
                    "Catalog lookup failed"
                );
                SyncError::Catalog {
                    identifier: arxiv_id.to_string(),
                    source,
                }
            })?;

        let paper = fetched.with_record_id(page_id.clone());
        let request = self.mapper.build_update(&paper)?;
        let properties_written = request.properties.len();

        self.store.update_page(&request).await?;

        info!(
            page_id = %page_id,
            arxiv_id = %arxiv_id,
            title = %paper.title,
            "Tracked paper synced"
        );

        Ok(SyncOutcome {
            page_id,
            arxiv_id: arxiv_id.into(),
            paper,
            properties_written,
        })
    }
}
