//! Notion document store integration
//!
//! - [`page`]: page objects delivered by automation webhooks
//! - [`properties`]: typed property values and their type tags
//! - [`requests`]: pages API request bodies
//! - [`mapper`]: paper ⇄ page field mapping

pub mod mapper;
pub mod page;
pub mod properties;
pub mod requests;

pub use mapper::{FieldDescriptor, MapError, PaperMapper};
pub use page::NotionPage;
pub use properties::{PropertyType, PropertyValue, RichTextRun};
pub use requests::{PropertyRequest, UpdatePageRequest};
