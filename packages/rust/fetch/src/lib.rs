//! Single-page website fetcher.
//!
//! The enrichment pipeline reads exactly one page per site. [`PageFetcher`]
//! is the seam the orchestrator depends on; [`HttpFetcher`] is the
//! reqwest-backed implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::{debug, instrument, warn};

use scout_shared::{FetchConfig, RawPage, Result, ScoutError};

/// Accept header sent with every page request.
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Retrieves the raw HTML for one URL.
///
/// Implementations must fail with [`ScoutError::Fetch`]: carrying the
/// upstream status for non-2xx answers, and no status for transport failures.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawPage>;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// Fetches pages over HTTP(S) with a fixed identifying User-Agent.
///
/// One GET per call: no retries, no body size cap, and the client's
/// default redirect policy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from the `[fetch]` config section.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        // Ask intermediaries for a fresh copy.
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ScoutError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<RawPage> {
        debug!("fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::transport(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(ScoutError::fetch_status(
                status.as_u16(),
                format!("{url}: HTTP {status}"),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::transport(format!("{url}: body read failed: {e}")))?;

        debug!(status = status.as_u16(), bytes = html.len(), "page fetched");

        Ok(RawPage {
            fetched_at: Utc::now(),
            status: status.as_u16(),
            html,
        })
    }
}
