//! arXiv identifier extraction
//!
//! Pulls an arXiv id out of an abs or pdf link on arxiv.org or the
//! alphaxiv.org mirror. Both identifier schemes are accepted:
//! - modern: `YYMM.NNNNN` (4 or 5 digit sequence), e.g. `2505.22618v2`
//! - legacy: `subject-class/YYMMNNN`, e.g. `cs/0512345`, `math.GT/0309136`
//!
//! The raw token after `abs/` or `pdf/` runs until `?`, `#` or whitespace.
//! It is not cut at `/`, so legacy ids survive whole. After normalization
//! (percent-decoding, trailing `/`, `.pdf` suffix) the token must be exactly
//! one identifier, otherwise extraction yields `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Host + path shape; group 1 is the raw identifier token
static ARXIV_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[/.@])(?i:arxiv|alphaxiv)\.org/(?:abs|pdf)/([^?#\s]*)")
        .expect("arXiv URL pattern is valid")
});

static MODERN_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}\.\d{4,5}(?:v\d+)?$").expect("modern id pattern is valid")
});

static LEGACY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]+(?:-[a-z]+)*(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?$")
        .expect("legacy id pattern is valid")
});

/// Validated arXiv identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArxivId(String);

impl ArxivId {
    /// Validate a bare identifier (no URL around it)
    pub fn parse(candidate: &str) -> Option<Self> {
        if MODERN_ID.is_match(candidate) || LEGACY_ID.is_match(candidate) {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pre-2007 `subject-class/NNNNNNN` scheme
    pub fn is_legacy(&self) -> bool {
        self.0.contains('/')
    }

    pub fn abs_url(&self) -> String {
        format!("https://arxiv.org/abs/{}", self.0)
    }
}

impl fmt::Display for ArxivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArxivId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for ArxivId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<ArxivId> for String {
    fn from(id: ArxivId) -> Self {
        id.0
    }
}

/// Extract the arXiv id from a URL
///
/// Never panics; any input that is not a recognized abs/pdf link holding
/// exactly one valid identifier returns `None`.
pub fn extract_arxiv_id(url: &str) -> Option<ArxivId> {
    let raw = ARXIV_URL.captures(url)?.get(1)?.as_str();

    let decoded = urlencoding::decode(raw).ok()?;
    let trimmed = decoded.trim_end_matches('/');
    let candidate = trimmed.strip_suffix(".pdf").unwrap_or(trimmed);

    ArxivId::parse(candidate)
}
