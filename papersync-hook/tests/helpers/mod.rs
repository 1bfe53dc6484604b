//! Shared fixtures and in-memory collaborators for integration tests

#![allow(dead_code)]

use papersync_hook::models::PaperRecord;
use papersync_hook::notion::UpdatePageRequest;
use papersync_hook::types::{CatalogError, CatalogLookup, DocumentStore, StoreError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Catalog answering from a fixed map; unknown ids are NotFound
#[derive(Default)]
pub struct FakeCatalog {
    papers: HashMap<String, PaperRecord>,
    failure: Option<CatalogError>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_paper(identifier: &str, paper: PaperRecord) -> Self {
        let mut papers = HashMap::new();
        papers.insert(identifier.to_string(), paper);
        Self {
            papers,
            ..Default::default()
        }
    }

    pub fn failing(error: CatalogError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogLookup for FakeCatalog {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn fetch(&self, identifier: &str) -> Result<PaperRecord, CatalogError> {
        self.lookups.lock().unwrap().push(identifier.to_string());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.papers
            .get(identifier)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(identifier.to_string()))
    }
}

/// Store recording every update request it receives
#[derive(Default)]
pub struct RecordingStore {
    failure: Option<StoreError>,
    pub updates: Mutex<Vec<UpdatePageRequest>>,
}

impl RecordingStore {
    pub fn failing(error: StoreError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn updates(&self) -> Vec<UpdatePageRequest> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentStore for RecordingStore {
    async fn update_page(&self, request: &UpdatePageRequest) -> Result<(), StoreError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.updates.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// What arXiv would return for 2505.22618
pub fn fetched_paper() -> PaperRecord {
    PaperRecord {
        record_id: None,
        title: "Fast-dLLM: Training-free Acceleration of Diffusion LLM".to_string(),
        authors: vec![
            "Chengyue Wu".to_string(),
            "Hao Zhang".to_string(),
            "Enze Xie".to_string(),
        ],
        summary: "Diffusion-based large language models have shown promise.".to_string(),
        url: "http://arxiv.org/abs/2505.22618v1".to_string(),
        publication_year: 2025,
    }
}

fn runs(texts: &[&str]) -> Value {
    Value::Array(
        texts
            .iter()
            .map(|t| json!({"type": "text", "text": {"content": t}, "plain_text": t}))
            .collect(),
    )
}

/// Automation webhook body for a freshly added page
pub fn webhook_payload(page_id: &str, link: &str) -> Value {
    json!({
        "source": {"type": "automation", "automation_id": "auto-1"},
        "data": {
            "object": "page",
            "id": page_id,
            "properties": {
                "Title": {"id": "title", "type": "title", "title": runs(&["placeholder"])},
                "Authors": {"id": "a", "type": "rich_text", "rich_text": []},
                "Summary": {"id": "s", "type": "rich_text", "rich_text": []},
                "Link": {"id": "l", "type": "url", "url": link},
                "Publication Year": {"id": "y", "type": "number", "number": null}
            }
        }
    })
}
