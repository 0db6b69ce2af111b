//! End-to-end enrichment: URL → fetch → text → extractors → signals → cache.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use scout_fetch::PageFetcher;
use scout_shared::{
    EnrichmentConfig, EnrichmentResult, NormalizedUrl, RawPage, Result, ScoutError, Source,
    SourceType, coerce_scheme,
};
use scout_text::{split_sentences, strip_html};

use crate::keywords::extract_keywords;
use crate::signals::infer_signals;
use crate::store::{EnrichmentStore, FlightGuard};
use crate::summary::build_summary;
use crate::topics::build_what_they_do;

/// Run every analysis stage over an already-fetched page.
///
/// Pure: the same page always produces the same result, and `fetched_at`
/// is taken from the page.
pub fn analyze_page(
    url: &NormalizedUrl,
    page: &RawPage,
    config: &EnrichmentConfig,
) -> EnrichmentResult {
    let text = strip_html(&page.html);
    let sentences = split_sentences(&text);

    debug!(
        text_len = text.len(),
        sentences = sentences.len(),
        "page normalized"
    );

    EnrichmentResult {
        url: url.clone(),
        fetched_at: page.fetched_at,
        summary: build_summary(&sentences, config),
        what_they_do: build_what_they_do(&sentences, config),
        keywords: extract_keywords(&text, config.keyword_limit),
        signals: infer_signals(&page.html, &text, config.min_signal_records),
        sources: vec![Source {
            source_type: SourceType::Website,
            url: url.to_string(),
        }],
        cached: None,
    }
}

/// Orchestrates enrichment over an injected fetcher and store.
///
/// Cheap to clone; clones share the fetcher, store and flight guard.
#[derive(Clone)]
pub struct Enricher {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn EnrichmentStore>,
    flights: Arc<FlightGuard>,
    config: EnrichmentConfig,
}

impl Enricher {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn EnrichmentStore>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            flights: Arc::new(FlightGuard::new()),
            config,
        }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Enrich a website, serving from the cache when possible.
    ///
    /// Cache hits are returned with `cached: Some(true)` and skip all network
    /// and analysis work.
    pub async fn enrich(&self, input: &str) -> Result<EnrichmentResult> {
        self.run(input, false).await
    }

    /// Enrich a website ignoring any cached entry, then overwrite it.
    pub async fn refresh(&self, input: &str) -> Result<EnrichmentResult> {
        self.run(input, true).await
    }

    #[instrument(skip(self), fields(single_flight = self.config.single_flight))]
    async fn run(&self, input: &str, force_refresh: bool) -> Result<EnrichmentResult> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ScoutError::validation("url must be a non-empty string"));
        }

        let target = coerce_scheme(input);
        let key = NormalizedUrl::new(&target);

        if !force_refresh {
            if let Some(hit) = self.cached(&key) {
                return Ok(hit);
            }
        }

        let _permit = if self.config.single_flight {
            let permit = self.flights.acquire(&key).await;
            // Someone may have finished this key while we waited.
            if !force_refresh {
                if let Some(hit) = self.cached(&key) {
                    return Ok(hit);
                }
            }
            Some(permit)
        } else {
            None
        };

        info!(url = %key, "cache miss, fetching");
        let start = Instant::now();

        let page = self.fetcher.fetch(&target).await?;

        // Regex passes over an uncapped body are CPU-bound; keep them off
        // the async workers.
        let config = self.config.clone();
        let url = key.clone();
        let result = tokio::task::spawn_blocking(move || analyze_page(&url, &page, &config))
            .await
            .map_err(|e| ScoutError::Internal(format!("analysis task failed: {e}")))?;

        self.store.put(key.clone(), result.clone());

        info!(
            url = %key,
            summary_len = result.summary.len(),
            what_they_do = result.what_they_do.len(),
            keywords = result.keywords.len(),
            signals = result.signals.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "enrichment complete"
        );

        Ok(result)
    }

    fn cached(&self, key: &NormalizedUrl) -> Option<EnrichmentResult> {
        let hit = self.store.get(key)?;
        info!(url = %key, "cache hit");
        Some(hit.as_cached())
    }
}
