//! Core domain types for website enrichment.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// NormalizedUrl
// ---------------------------------------------------------------------------

/// Prefix `https://` unless the input already names an http(s) scheme.
///
/// The check is case-insensitive; surrounding whitespace is trimmed.
pub fn coerce_scheme(input: &str) -> String {
    static SCHEME_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

    let trimmed = input.trim();
    if SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Canonical `scheme://host/path` form of a website address.
///
/// Used as the cache key and as the identity reported back to callers.
/// Normalizing a normalized URL yields itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Normalize free-form input. Never fails.
    ///
    /// The host is lowercased and the port dropped, trailing slashes are
    /// stripped from the path (an empty path becomes `/`), and query and
    /// fragment are discarded. Input that does not parse as a URL falls back
    /// to the trimmed, scheme-coerced string.
    pub fn new(input: &str) -> Self {
        let coerced = coerce_scheme(input);

        let Ok(parsed) = Url::parse(&coerced) else {
            return Self(coerced);
        };
        let Some(host) = parsed.host_str() else {
            return Self(coerced);
        };

        let trimmed = parsed.path().trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        Self(format!("{}://{}{}", parsed.scheme(), host, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RawPage
// ---------------------------------------------------------------------------

/// A single fetched page, held only for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// When the response arrived.
    pub fetched_at: DateTime<Utc>,
    /// Upstream HTTP status.
    pub status: u16,
    /// Response body, unmodified.
    pub html: String,
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// The fixed set of business signals inferred from a page.
///
/// Declaration order is the order records are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    CareersPage,
    BlogOrNews,
    DocsOrDeveloperPortal,
    PricingPage,
    ProductOrPlatform,
}

impl SignalType {
    /// Every signal, in reporting order.
    pub const ALL: [SignalType; 5] = [
        Self::CareersPage,
        Self::BlogOrNews,
        Self::DocsOrDeveloperPortal,
        Self::PricingPage,
        Self::ProductOrPlatform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CareersPage => "careers_page",
            Self::BlogOrNews => "blog_or_news",
            Self::DocsOrDeveloperPortal => "docs_or_developer_portal",
            Self::PricingPage => "pricing_page",
            Self::ProductOrPlatform => "product_or_platform",
        }
    }

    /// Human-readable evidence reported when the signal is present.
    pub fn evidence(&self) -> &'static str {
        match self {
            Self::CareersPage => "Found careers-related links or copy",
            Self::BlogOrNews => "Found blog/news links or copy",
            Self::DocsOrDeveloperPortal => "Found docs/developer-related links or copy",
            Self::PricingPage => "Found pricing/plan links or copy",
            Self::ProductOrPlatform => "Website copy describes a product/platform/solution",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inferred signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub present: bool,
    /// Set only when `present` is true.
    pub evidence: Option<String>,
}

impl SignalRecord {
    pub fn new(signal_type: SignalType, present: bool) -> Self {
        Self {
            signal_type,
            present,
            evidence: present.then(|| signal_type.evidence().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Kind of provenance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Website,
}

/// Where a piece of the result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub url: String,
}

// ---------------------------------------------------------------------------
// EnrichmentResult
// ---------------------------------------------------------------------------

/// Structured profile derived from a single page. The unit of caching and
/// the response body of the enrich endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    pub url: NormalizedUrl,
    pub fetched_at: DateTime<Utc>,
    /// Up to two leading sentences.
    pub summary: String,
    /// Up to four distinct descriptive sentences.
    pub what_they_do: Vec<String>,
    /// Up to `keyword_limit` lowercase tokens, most frequent first.
    pub keywords: Vec<String>,
    pub signals: Vec<SignalRecord>,
    pub sources: Vec<Source>,
    /// Present (and true) only when served from the cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl EnrichmentResult {
    /// A copy tagged as served from the cache.
    pub fn as_cached(&self) -> Self {
        Self {
            cached: Some(true),
            ..self.clone()
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached == Some(true)
    }
}
