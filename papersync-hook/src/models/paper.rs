//! Paper record shared by the catalog and the Notion mapper

use serde::{Deserialize, Serialize};

/// A tracked paper
///
/// Built either by decoding a Notion page (carries `record_id`) or from a
/// catalog lookup (no `record_id`). Values are not mutated after
/// construction; [`PaperRecord::with_record_id`] returns a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Notion page id, if known
    pub record_id: Option<String>,
    pub title: String,
    /// Author names in display order
    pub authors: Vec<String>,
    /// Abstract
    pub summary: String,
    /// Catalog reference (abs page URL)
    pub url: String,
    pub publication_year: i32,
}

impl PaperRecord {
    /// Merge step: attach the page id recovered from the webhook payload
    pub fn with_record_id(self, record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            ..self
        }
    }
}
