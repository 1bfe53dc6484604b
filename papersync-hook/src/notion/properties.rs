//! Typed view of Notion page property values
//!
//! Only the property kinds the paper schema uses are decoded into
//! [`PropertyValue`]. Every other kind is still recognized by its `type`
//! tag so schema mismatches can name what was actually found.

use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;

/// Declared `type` tag of a Notion property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Title,
    RichText,
    Number,
    Url,
    /// Any other Notion property kind (select, date, checkbox, ...)
    Other(String),
}

impl PropertyType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "url" => Self::Url,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Url => "url",
            Self::Other(tag) => tag,
        }
    }

    /// Read the declared tag of a raw property object
    pub fn of(raw: &Value) -> Option<Self> {
        raw.get("type").and_then(Value::as_str).map(Self::from_tag)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rich-text run
///
/// `plain_text` must be a JSON string; numbers or booleans are rejected
/// rather than converted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RichTextRun {
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }
}

/// Decoded value of a supported property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichTextRun>),
    RichText(Vec<RichTextRun>),
    Number(Option<Number>),
    Url(Option<String>),
}

#[derive(Deserialize)]
struct TitleBody {
    title: Vec<RichTextRun>,
}

#[derive(Deserialize)]
struct RichTextBody {
    rich_text: Vec<RichTextRun>,
}

#[derive(Deserialize)]
struct NumberBody {
    #[serde(default)]
    number: Option<Number>,
}

#[derive(Deserialize)]
struct UrlBody {
    #[serde(default)]
    url: Option<String>,
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Title(_) => PropertyType::Title,
            Self::RichText(_) => PropertyType::RichText,
            Self::Number(_) => PropertyType::Number,
            Self::Url(_) => PropertyType::Url,
        }
    }

    /// Decode the payload of a raw property according to its declared tag
    ///
    /// The caller is expected to have checked the tag already; an
    /// unsupported tag is reported as an error here too.
    pub fn from_raw(raw: &Value) -> Result<Self, String> {
        let tag = PropertyType::of(raw).ok_or_else(|| "missing `type` tag".to_string())?;
        let decoded = match tag {
            PropertyType::Title => {
                TitleBody::deserialize(raw).map(|body| Self::Title(body.title))
            }
            PropertyType::RichText => {
                RichTextBody::deserialize(raw).map(|body| Self::RichText(body.rich_text))
            }
            PropertyType::Number => {
                NumberBody::deserialize(raw).map(|body| Self::Number(body.number))
            }
            PropertyType::Url => UrlBody::deserialize(raw).map(|body| Self::Url(body.url)),
            PropertyType::Other(tag) => {
                return Err(format!("unsupported property type `{}`", tag));
            }
        };
        decoded.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_round_trip() {
        for tag in ["title", "rich_text", "number", "url", "select"] {
            assert_eq!(PropertyType::from_tag(tag).as_str(), tag);
        }
        assert_eq!(
            PropertyType::of(&json!({"type": "multi_select"})),
            Some(PropertyType::Other("multi_select".to_string()))
        );
        assert_eq!(PropertyType::of(&json!({"id": "x"})), None);
    }

    #[test]
    fn test_decode_title() {
        let raw = json!({
            "id": "title",
            "type": "title",
            "title": [{
                "type": "text",
                "text": {"content": "Paper", "link": null},
                "plain_text": "Paper",
                "href": null
            }]
        });
        assert_eq!(
            PropertyValue::from_raw(&raw).unwrap(),
            PropertyValue::Title(vec![RichTextRun::plain("Paper")])
        );
    }

    #[test]
    fn test_decode_number_null_and_missing() {
        let null = json!({"type": "number", "number": null});
        assert_eq!(PropertyValue::from_raw(&null).unwrap(), PropertyValue::Number(None));

        let missing = json!({"type": "number"});
        assert_eq!(PropertyValue::from_raw(&missing).unwrap(), PropertyValue::Number(None));
    }

    #[test]
    fn test_non_string_plain_text_rejected() {
        let raw = json!({"type": "rich_text", "rich_text": [{"plain_text": 42}]});
        assert!(PropertyValue::from_raw(&raw).is_err());

        let raw = json!({"type": "url", "url": true});
        assert!(PropertyValue::from_raw(&raw).is_err());
    }

    #[test]
    fn test_unsupported_tag_rejected() {
        let raw = json!({"type": "checkbox", "checkbox": true});
        assert!(PropertyValue::from_raw(&raw).is_err());
    }
}
