//! arXiv export API client
//!
//! Resolves an arXiv identifier to a [`PaperRecord`].
//!
//! # API Reference
//! - Endpoint: `https://export.arxiv.org/api/query?id_list={id}`
//! - Response: Atom 1.0 feed, one `<entry>` per matched paper
//! - Documentation: https://info.arxiv.org/help/api/user-manual.html

use crate::models::PaperRecord;
use crate::services::atom_feed::{parse_feed, AtomEntry};
use crate::types::{CatalogError, CatalogLookup};
use chrono::{DateTime, Datelike};
use papersync_common::config::ArxivConfig;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, info};

/// User-Agent header sent with every query
const USER_AGENT: &str = concat!("papersync/", env!("CARGO_PKG_VERSION"));

/// arXiv API client
pub struct ArxivClient {
    http_client: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ArxivConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Query the API for one identifier and return the first usable entry
    ///
    /// # Errors
    /// - `NotFound`: empty feed, or arXiv reported the id as an error entry
    /// - `Network`: request could not be sent or timed out
    /// - `Api`: non-success HTTP status
    /// - `Parse`: feed is not valid Atom
    async fn query_entry(&self, identifier: &str) -> Result<AtomEntry, CatalogError> {
        let url = format!("{}/query", self.base_url);
        debug!(arxiv_id = %identifier, url = %url, "Querying arXiv API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("id_list", identifier), ("max_results", "1")])
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("arXiv API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(format!("arXiv API body read failed: {}", e)))?;

        let feed = parse_feed(&body)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse arXiv feed: {}", e)))?;

        let entry = feed
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(identifier.to_string()))?;

        if entry.is_error() {
            debug!(
                arxiv_id = %identifier,
                reason = ?entry.summary,
                "arXiv API returned an error entry"
            );
            return Err(CatalogError::NotFound(identifier.to_string()));
        }

        Ok(entry)
    }
}

/// Convert an Atom entry into a catalog record
pub fn entry_to_record(identifier: &str, entry: AtomEntry) -> Result<PaperRecord, CatalogError> {
    // Entries for unknown ids come back with neither title nor dates
    if entry.title.is_none() && entry.published.is_none() {
        return Err(CatalogError::NotFound(identifier.to_string()));
    }

    let title = entry
        .title
        .as_deref()
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CatalogError::Parse(format!("Entry {} has no title", entry.id)))?;

    let published = entry
        .published
        .as_deref()
        .ok_or_else(|| CatalogError::Parse(format!("Entry {} has no published date", entry.id)))?;
    let publication_year = DateTime::parse_from_rfc3339(published.trim())
        .map_err(|e| CatalogError::Parse(format!("Invalid published date '{}': {}", published, e)))?
        .year();

    Ok(PaperRecord {
        record_id: None,
        title,
        authors: entry.authors.into_iter().map(|a| a.name).collect(),
        summary: entry.summary.as_deref().map(str::trim).unwrap_or_default().to_string(),
        url: entry.id.trim().to_string(),
        publication_year,
    })
}

/// Titles are wrapped across lines in the feed
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait::async_trait]
impl CatalogLookup for ArxivClient {
    fn name(&self) -> &'static str {
        "arXiv"
    }

    async fn fetch(&self, identifier: &str) -> Result<PaperRecord, CatalogError> {
        let entry = self.query_entry(identifier).await?;
        let record = entry_to_record(identifier, entry)?;

        info!(
            arxiv_id = %identifier,
            title = %record.title,
            authors = record.authors.len(),
            year = record.publication_year,
            "Retrieved paper from arXiv"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::atom_feed::fixtures::FEED_ONE_ENTRY;
    use crate::services::atom_feed::AtomAuthor;

    fn entry() -> AtomEntry {
        AtomEntry {
            id: "http://arxiv.org/abs/cs/0512345v1".to_string(),
            title: Some("A  legacy\n   paper".to_string()),
            summary: Some("\n  Abstract text.\n".to_string()),
            published: Some("2005-12-01T10:00:00Z".to_string()),
            authors: vec![
                AtomAuthor { name: "Zed".to_string() },
                AtomAuthor { name: "Amy".to_string() },
            ],
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ArxivClient::new("https://export.arxiv.org/api/", Duration::from_secs(5));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://export.arxiv.org/api");
    }

    #[test]
    fn test_entry_to_record() {
        let record = entry_to_record("cs/0512345", entry()).unwrap();

        assert_eq!(record.record_id, None);
        assert_eq!(record.title, "A legacy paper");
        assert_eq!(record.summary, "Abstract text.");
        assert_eq!(record.authors, vec!["Zed", "Amy"]);
        assert_eq!(record.url, "http://arxiv.org/abs/cs/0512345v1");
        assert_eq!(record.publication_year, 2005);
    }

    #[test]
    fn test_entry_from_feed_fixture() {
        let feed = parse_feed(FEED_ONE_ENTRY).unwrap();
        let entry = feed.entries.into_iter().next().unwrap();
        let record = entry_to_record("2505.22618", entry).unwrap();

        assert_eq!(
            record.title,
            "Fast-dLLM: Training-free Acceleration of Diffusion LLM by Enabling KV Cache and Parallel Decoding"
        );
        assert!(record.summary.starts_with("Diffusion-based"));
        assert_eq!(record.publication_year, 2025);
    }

    #[test]
    fn test_placeholder_entry_is_not_found() {
        let mut placeholder = entry();
        placeholder.title = None;
        placeholder.published = None;
        assert_eq!(
            entry_to_record("1234.56789", placeholder),
            Err(CatalogError::NotFound("1234.56789".to_string()))
        );
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let mut bad = entry();
        bad.published = Some("December 2005".to_string());
        assert!(matches!(
            entry_to_record("cs/0512345", bad),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_blank_title_is_parse_error() {
        let mut bad = entry();
        bad.title = Some("   ".to_string());
        assert!(matches!(
            entry_to_record("cs/0512345", bad),
            Err(CatalogError::Parse(_))
        ));
    }
}
