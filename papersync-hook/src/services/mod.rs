//! External service clients
//!
//! - arXiv export API (catalog)
//! - Notion pages API (document store)

pub mod arxiv_client;
pub mod atom_feed;
pub mod notion_client;

pub use arxiv_client::ArxivClient;
pub use notion_client::NotionClient;
