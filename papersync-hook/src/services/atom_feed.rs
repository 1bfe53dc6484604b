//! Atom feed returned by the arXiv export API
//!
//! Only the entry fields the paper record needs are decoded; the rest of the
//! feed (links, categories, opensearch counters) is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AtomFeed {
    #[serde(rename = "entry", default)]
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AtomEntry {
    /// Canonical abs URL, or an `/api/errors#...` URL for error entries
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// RFC 3339 timestamp of the first version
    #[serde(default)]
    pub published: Option<String>,
    #[serde(rename = "author", default)]
    pub authors: Vec<AtomAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AtomAuthor {
    pub name: String,
}

impl AtomEntry {
    /// arXiv reports malformed queries as a feed entry under /api/errors
    pub fn is_error(&self) -> bool {
        self.id.contains("/api/errors")
    }
}

pub fn parse_feed(xml: &str) -> Result<AtomFeed, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}
