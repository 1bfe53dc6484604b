//! Collaborator traits and their error types
//!
//! The sync workflow only talks to the catalog and the document store
//! through these traits, so tests can swap in in-memory fakes.

use crate::models::PaperRecord;
use crate::notion::UpdatePageRequest;
use thiserror::Error;

/// Catalog lookup failures
///
/// `NotFound` means the catalog answered and has no such paper. Everything
/// else means the question could not be answered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Paper not found in catalog: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Whether retrying later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::NotFound(_) | Self::Parse(_) => false,
        }
    }
}

/// Document store failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Notion API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Client configuration error: {0}")]
    Config(String),
}

/// Metadata catalog keyed by identifier
#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Catalog name for logging
    fn name(&self) -> &'static str;

    /// Look up exactly one identifier
    ///
    /// The returned record never carries a `record_id`.
    async fn fetch(&self, identifier: &str) -> Result<PaperRecord, CatalogError>;
}

/// Store holding the tracked pages
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Apply one update request as a single call
    async fn update_page(&self, request: &UpdatePageRequest) -> Result<(), StoreError>;
}
