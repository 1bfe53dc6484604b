//! Notion page objects as delivered by database automation webhooks

use serde::Deserialize;
use serde_json::{Map, Value};

/// A page with its raw property map
///
/// Properties stay untyped until the mapper has checked each declared type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl NotionPage {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Unwrap the automation envelope `{"source": {...}, "data": <page>}`
    pub fn from_webhook(payload: &Value) -> Result<Self, String> {
        let data = payload
            .get("data")
            .ok_or_else(|| "payload has no `data` object".to_string())?;
        Self::deserialize(data).map_err(|e| format!("`data` is not a page object: {}", e))
    }
}
