//! Identifier extractors

pub mod arxiv_id;

pub use arxiv_id::{extract_arxiv_id, ArxivId};
