//! Request bodies for the Notion pages API

use crate::notion::properties::{PropertyValue, RichTextRun};
use serde::Serialize;
use serde_json::Number;
use std::collections::BTreeMap;

/// `{"text": {"content": "..."}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRequest {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub content: String,
}

impl TextRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// Write-request shape of one property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyRequest {
    Title { title: Vec<TextRequest> },
    RichText { rich_text: Vec<TextRequest> },
    Number { number: Option<Number> },
    Url { url: Option<String> },
}

impl PropertyRequest {
    /// The value Notion reports back once this request has been applied
    pub fn applied_value(&self) -> PropertyValue {
        fn runs(texts: &[TextRequest]) -> Vec<RichTextRun> {
            texts
                .iter()
                .map(|t| RichTextRun::plain(t.text.content.clone()))
                .collect()
        }

        match self {
            Self::Title { title } => PropertyValue::Title(runs(title)),
            Self::RichText { rich_text } => PropertyValue::RichText(runs(rich_text)),
            Self::Number { number } => PropertyValue::Number(number.clone()),
            Self::Url { url } => PropertyValue::Url(url.clone()),
        }
    }
}

/// PATCH /v1/pages/{page_id}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePageRequest {
    #[serde(skip)]
    pub page_id: String,
    pub properties: BTreeMap<String, PropertyRequest>,
}

/// Parent of a page to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseParent {
    pub database_id: String,
}

/// POST /v1/pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: DatabaseParent,
    pub properties: BTreeMap<String, PropertyRequest>,
}
