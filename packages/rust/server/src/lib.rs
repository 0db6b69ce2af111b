//! HTTP surface for the enrichment pipeline.
//!
//! One endpoint, `POST /api/enrich`, taking `{ "url": string }` and
//! answering with an `EnrichmentResult` or a `{ "error": string }` body.

mod error;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use scout_core::Enricher;
use scout_shared::{Result, ScoutError};

pub use error::ApiError;

/// Route the enrich endpoint lives on.
pub const ENRICH_PATH: &str = "/api/enrich";

#[derive(Clone)]
struct AppState {
    enricher: Enricher,
}

/// Build the application router around a configured [`Enricher`].
pub fn router(enricher: Enricher) -> Router {
    Router::new()
        .route(ENRICH_PATH, post(enrich_handler))
        .with_state(AppState { enricher })
}

/// Serve the router on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, enricher: Enricher) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| ScoutError::Internal(format!("listener has no local address: {e}")))?;
    info!(%addr, path = ENRICH_PATH, "enrichment endpoint listening");

    axum::serve(listener, router(enricher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ScoutError::Internal(format!("server error: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Fields read from the request body. Anything else is ignored.
struct EnrichRequest {
    url: String,
    force_refresh: bool,
}

impl EnrichRequest {
    /// Absent or unparseable bodies, and a `url` that is not a string, are
    /// all the same validation failure.
    fn parse(body: &[u8]) -> Result<Self> {
        let invalid = || ScoutError::validation("missing or invalid 'url' in request body");

        let value: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
        let url = value.get("url").and_then(Value::as_str).ok_or_else(invalid)?;
        let force_refresh = value
            .get("forceRefresh")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            url: url.to_string(),
            force_refresh,
        })
    }
}

async fn enrich_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let span = info_span!("enrich_request", request_id = %Uuid::now_v7());

    async move {
        let request = match EnrichRequest::parse(&body) {
            Ok(request) => request,
            Err(e) => return ApiError::from(e).into_response(),
        };

        let outcome = if request.force_refresh {
            state.enricher.refresh(&request.url).await
        } else {
            state.enricher.enrich(&request.url).await
        };

        match outcome {
            Ok(result) => (StatusCode::OK, Json(result)).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use scout_core::MemoryStore;
    use scout_fetch::PageFetcher;
    use scout_shared::{EnrichmentConfig, RawPage};

    struct StubFetcher {
        calls: AtomicUsize,
        status: Option<u16>,
        fail_transport: bool,
    }

    impl StubFetcher {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status: None,
                fail_transport: false,
            })
        }

        fn upstream(status: u16) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status: Some(status),
                fail_transport: false,
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status: None,
                fail_transport: true,
            })
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<RawPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.status {
                return Err(ScoutError::fetch_status(status, format!("{url}: HTTP {status}")));
            }
            if self.fail_transport {
                return Err(ScoutError::transport(format!("{url}: dns error")));
            }
            Ok(RawPage {
                fetched_at: Utc::now(),
                status: 200,
                html: r#"<a href="/pricing">Pricing</a><p>Our platform helps teams ship faster every week.</p>"#
                    .into(),
            })
        }
    }

    async fn spawn_app(fetcher: Arc<StubFetcher>) -> SocketAddr {
        let enricher = Enricher::new(
            fetcher,
            Arc::new(MemoryStore::new()),
            EnrichmentConfig::default(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(enricher)).await.unwrap();
        });
        addr
    }

    async fn post_raw(addr: SocketAddr, body: &str) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("http://{addr}{ENRICH_PATH}"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        let json = response.json::<Value>().await.unwrap();
        (status, json)
    }

    #[test]
    fn request_parsing() {
        let request = EnrichRequest::parse(br#"{"url":"example.com","forceRefresh":true}"#).unwrap();
        assert_eq!(request.url, "example.com");
        assert!(request.force_refresh);

        let request = EnrichRequest::parse(br#"{"url":"example.com","forceRefresh":"yes"}"#).unwrap();
        assert!(!request.force_refresh);

        let bad_bodies: [&[u8]; 6] = [b"", b"not json", b"null", b"[]", br#"{"url":42}"#, br#"{"link":"x"}"#];
        for bad in bad_bodies {
            assert!(EnrichRequest::parse(bad).is_err());
        }
    }

    #[tokio::test]
    async fn enrich_ok_then_cached() {
        let fetcher = StubFetcher::ok();
        let addr = spawn_app(fetcher.clone()).await;

        let (status, body) = post_raw(addr, r#"{"url":"example.com"}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body["url"], "https://example.com/");
        assert!(body.get("cached").is_none());
        assert!(body["fetchedAt"].is_string());
        assert_eq!(body["signals"][0]["type"], "pricing_page");
        assert_eq!(body["sources"][0]["type"], "website");

        let (status, body) = post_raw(addr, r#"{"url":"https://example.com/"}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body["cached"], true);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn force_refresh_refetches() {
        let fetcher = StubFetcher::ok();
        let addr = spawn_app(fetcher.clone()).await;

        post_raw(addr, r#"{"url":"example.com"}"#).await;
        let (status, body) = post_raw(addr, r#"{"url":"example.com","forceRefresh":true}"#).await;
        assert_eq!(status, 200);
        assert!(body.get("cached").is_none());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_body_is_400() {
        let addr = spawn_app(StubFetcher::ok()).await;

        for body in ["", "{", r#"{"url":null}"#, r#"{"url":["a"]}"#, r#"{"url":"   "}"#] {
            let (status, json) = post_raw(addr, body).await;
            assert_eq!(status, 400, "body: {body}");
            assert_eq!(json["error"], "Missing or invalid 'url' in request body");
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_502_with_status() {
        let addr = spawn_app(StubFetcher::upstream(404)).await;

        let (status, json) = post_raw(addr, r#"{"url":"example.com"}"#).await;
        assert_eq!(status, 502);
        assert_eq!(json["error"], "Failed to fetch URL (status 404)");
    }

    #[tokio::test]
    async fn unreachable_site_is_502() {
        let addr = spawn_app(StubFetcher::unreachable()).await;

        let (status, json) = post_raw(addr, r#"{"url":"not a url at all !!"}"#).await;
        assert_eq!(status, 502);
        assert_eq!(json["error"], "Failed to fetch URL");
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let addr = spawn_app(StubFetcher::ok()).await;
        let response = reqwest::get(format!("http://{addr}{ENRICH_PATH}")).await.unwrap();
        assert_eq!(response.status().as_u16(), 405);
    }
}
