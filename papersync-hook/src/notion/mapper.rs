//! Paper ⇄ Notion page mapping
//!
//! Each paper field is described by a [`FieldDescriptor`]: the Notion
//! property name, the property type it must have, a parser that reads the
//! typed value and a builder that produces the write request. The mapper is
//! a table of those descriptors.
//!
//! Page schema:
//!
//! | Property           | Type        | Field              |
//! |--------------------|-------------|--------------------|
//! | `Title`            | `title`     | `title`            |
//! | `Authors`          | `rich_text` | `authors`          |
//! | `Summary`          | `rich_text` | `summary`          |
//! | `Link`             | `url`       | `url`              |
//! | `Publication Year` | `number`    | `publication_year` |
//!
//! Decoding is strict about types: a property whose declared type differs
//! from the table fails the whole decode. The year is the exception on the
//! value side only: absent, null or non-integral values decode to `0`.
//!
//! Only the first run of `Summary` is read. Abstracts that Notion split
//! over several runs come back truncated to that run.

use crate::models::PaperRecord;
use crate::notion::page::NotionPage;
use crate::notion::properties::{PropertyType, PropertyValue};
use crate::notion::requests::{CreatePageRequest, PropertyRequest, TextRequest, UpdatePageRequest};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Mapping errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Property '{field}' is missing from the page")]
    MissingProperty { field: &'static str },

    #[error("Property '{field}' has type '{actual}', expected '{expected}'")]
    SchemaMismatch {
        field: &'static str,
        expected: PropertyType,
        actual: PropertyType,
    },

    #[error("Property '{field}' has no text")]
    EmptyProperty { field: &'static str },

    #[error("Property '{field}' is malformed: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("record_id is required to update a Notion page")]
    MissingRecordId,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// Failure of a single parser, before the field name is attached
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// No text run to read
    Empty,
    /// Value of another property kind
    Unexpected(PropertyType),
}

pub type Parser<T> = fn(&PropertyValue) -> Result<T, FieldError>;
pub type Builder<T> = fn(&T) -> PropertyRequest;

/// Parser/builder pair for one paper field
pub struct FieldDescriptor<T> {
    pub notion_name: &'static str,
    pub property_type: PropertyType,
    /// Absent optional properties are not an error
    pub required: bool,
    pub parse: Parser<T>,
    pub build: Builder<T>,
}

impl<T> FieldDescriptor<T> {
    /// Declared type must equal the expected one
    pub fn check_type(&self, raw: &Value) -> Result<(), MapError> {
        let actual = PropertyType::of(raw).ok_or_else(|| MapError::InvalidValue {
            field: self.notion_name,
            reason: "missing `type` tag".to_string(),
        })?;
        if actual != self.property_type {
            return Err(MapError::SchemaMismatch {
                field: self.notion_name,
                expected: self.property_type.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Type gate, then parse. `Ok(None)` only for an absent optional property.
    pub fn read(&self, page: &NotionPage) -> Result<Option<T>, MapError> {
        let Some(raw) = page.property(self.notion_name) else {
            if self.required {
                return Err(MapError::MissingProperty {
                    field: self.notion_name,
                });
            }
            return Ok(None);
        };

        self.check_type(raw)?;
        let value = PropertyValue::from_raw(raw).map_err(|reason| MapError::InvalidValue {
            field: self.notion_name,
            reason,
        })?;
        self.parse_value(&value).map(Some)
    }

    pub fn parse_value(&self, value: &PropertyValue) -> Result<T, MapError> {
        (self.parse)(value).map_err(|e| match e {
            FieldError::Empty => MapError::EmptyProperty {
                field: self.notion_name,
            },
            FieldError::Unexpected(actual) => MapError::SchemaMismatch {
                field: self.notion_name,
                expected: self.property_type.clone(),
                actual,
            },
        })
    }

    pub fn build_request(&self, value: &T) -> PropertyRequest {
        (self.build)(value)
    }
}

/// Type-erased view used for whole-schema validation
pub trait FieldSchema {
    fn notion_name(&self) -> &'static str;
    fn property_type(&self) -> &PropertyType;
    fn required(&self) -> bool;
    fn check_type(&self, raw: &Value) -> Result<(), MapError>;
}

impl<T> FieldSchema for FieldDescriptor<T> {
    fn notion_name(&self) -> &'static str {
        self.notion_name
    }

    fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    fn required(&self) -> bool {
        self.required
    }

    fn check_type(&self, raw: &Value) -> Result<(), MapError> {
        FieldDescriptor::check_type(self, raw)
    }
}

// ----------------------------------------------------------------------------
// Parsers
// ----------------------------------------------------------------------------

fn parse_title(value: &PropertyValue) -> Result<String, FieldError> {
    match value {
        PropertyValue::Title(runs) => runs
            .first()
            .map(|run| run.plain_text.clone())
            .ok_or(FieldError::Empty),
        other => Err(FieldError::Unexpected(other.property_type())),
    }
}

fn parse_authors(value: &PropertyValue) -> Result<Vec<String>, FieldError> {
    match value {
        PropertyValue::RichText(runs) => Ok(runs.iter().map(|run| run.plain_text.clone()).collect()),
        other => Err(FieldError::Unexpected(other.property_type())),
    }
}

fn parse_summary(value: &PropertyValue) -> Result<String, FieldError> {
    match value {
        PropertyValue::RichText(runs) => Ok(runs
            .first()
            .map(|run| run.plain_text.clone())
            .unwrap_or_default()),
        other => Err(FieldError::Unexpected(other.property_type())),
    }
}

fn parse_url(value: &PropertyValue) -> Result<String, FieldError> {
    match value {
        PropertyValue::Url(url) => Ok(url.clone().unwrap_or_default()),
        other => Err(FieldError::Unexpected(other.property_type())),
    }
}

fn parse_publication_year(value: &PropertyValue) -> Result<i32, FieldError> {
    match value {
        PropertyValue::Number(number) => Ok(number.as_ref().and_then(whole_year).unwrap_or(0)),
        other => Err(FieldError::Unexpected(other.property_type())),
    }
}

/// Integral value within i32 range; `2020.0` counts, `2020.5` does not
fn whole_year(number: &Number) -> Option<i32> {
    if let Some(n) = number.as_i64() {
        return i32::try_from(n).ok();
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .filter(|f| *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
        .map(|f| f as i32)
}

// ----------------------------------------------------------------------------
// Builders
// ----------------------------------------------------------------------------

fn build_title(title: &String) -> PropertyRequest {
    PropertyRequest::Title {
        title: vec![TextRequest::new(title.as_str())],
    }
}

fn build_authors(authors: &Vec<String>) -> PropertyRequest {
    PropertyRequest::RichText {
        rich_text: authors.iter().map(|a| TextRequest::new(a.as_str())).collect(),
    }
}

fn build_summary(summary: &String) -> PropertyRequest {
    PropertyRequest::RichText {
        rich_text: vec![TextRequest::new(summary.as_str())],
    }
}

fn build_url(url: &String) -> PropertyRequest {
    PropertyRequest::Url {
        url: (!url.is_empty()).then(|| url.clone()),
    }
}

fn build_publication_year(year: &i32) -> PropertyRequest {
    PropertyRequest::Number {
        number: Some(Number::from(*year)),
    }
}

// ----------------------------------------------------------------------------
// Mapper
// ----------------------------------------------------------------------------

/// Field table for the paper tracking database
pub struct PaperMapper {
    pub title: FieldDescriptor<String>,
    pub authors: FieldDescriptor<Vec<String>>,
    pub summary: FieldDescriptor<String>,
    pub url: FieldDescriptor<String>,
    pub publication_year: FieldDescriptor<i32>,
}

impl Default for PaperMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperMapper {
    pub fn new() -> Self {
        Self {
            title: FieldDescriptor {
                notion_name: "Title",
                property_type: PropertyType::Title,
                required: true,
                parse: parse_title,
                build: build_title,
            },
            authors: FieldDescriptor {
                notion_name: "Authors",
                property_type: PropertyType::RichText,
                required: true,
                parse: parse_authors,
                build: build_authors,
            },
            summary: FieldDescriptor {
                notion_name: "Summary",
                property_type: PropertyType::RichText,
                required: true,
                parse: parse_summary,
                build: build_summary,
            },
            url: FieldDescriptor {
                notion_name: "Link",
                property_type: PropertyType::Url,
                required: true,
                parse: parse_url,
                build: build_url,
            },
            publication_year: FieldDescriptor {
                notion_name: "Publication Year",
                property_type: PropertyType::Number,
                required: false,
                parse: parse_publication_year,
                build: build_publication_year,
            },
        }
    }

    /// All field descriptors in schema order
    pub fn fields(&self) -> [&dyn FieldSchema; 5] {
        [
            &self.title,
            &self.authors,
            &self.summary,
            &self.url,
            &self.publication_year,
        ]
    }

    /// Check presence and declared type of every schema property
    pub fn validate_schema(&self, page: &NotionPage) -> Result<(), MapError> {
        for field in self.fields() {
            match page.property(field.notion_name()) {
                Some(raw) => field.check_type(raw)?,
                None if field.required() => {
                    return Err(MapError::MissingProperty {
                        field: field.notion_name(),
                    })
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Decode a webhook body (`{"data": <page>}`) into a paper record
    pub fn parse_payload(&self, payload: &Value) -> Result<PaperRecord, MapError> {
        let page = NotionPage::from_webhook(payload).map_err(MapError::InvalidPayload)?;
        self.to_domain(&page)
    }

    /// Decode a page. Nothing is returned unless every field decodes.
    pub fn to_domain(&self, page: &NotionPage) -> Result<PaperRecord, MapError> {
        self.validate_schema(page)?;

        Ok(PaperRecord {
            record_id: Some(page.id.clone()),
            title: required(self.title.read(page)?, self.title.notion_name)?,
            authors: required(self.authors.read(page)?, self.authors.notion_name)?,
            summary: required(self.summary.read(page)?, self.summary.notion_name)?,
            url: required(self.url.read(page)?, self.url.notion_name)?,
            publication_year: self.publication_year.read(page)?.unwrap_or(0),
        })
    }

    /// Build the page update. `Link` is never written back.
    pub fn build_update(&self, paper: &PaperRecord) -> Result<UpdatePageRequest, MapError> {
        let page_id = paper.record_id.clone().ok_or(MapError::MissingRecordId)?;

        let mut properties = BTreeMap::new();
        properties.insert(
            self.title.notion_name.to_string(),
            self.title.build_request(&paper.title),
        );
        properties.insert(
            self.authors.notion_name.to_string(),
            self.authors.build_request(&paper.authors),
        );
        properties.insert(
            self.summary.notion_name.to_string(),
            self.summary.build_request(&paper.summary),
        );
        properties.insert(
            self.publication_year.notion_name.to_string(),
            self.publication_year.build_request(&paper.publication_year),
        );

        Ok(UpdatePageRequest {
            page_id,
            properties,
        })
    }

    /// Page creation is not supported
    pub fn build_create(
        &self,
        _database_id: &str,
        _paper: &PaperRecord,
    ) -> Result<CreatePageRequest, MapError> {
        Err(MapError::UnsupportedOperation("create page"))
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MapError> {
    value.ok_or(MapError::MissingProperty { field })
}
