//! Document Fetcher — downloads untrusted remote PDFs over HTTP(S).
//!
//! The body is read chunk by chunk and abandoned as soon as it exceeds the
//! configured size cap. Transport errors and 5xx responses are retried with
//! exponential backoff; every other failure is final for that URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

const BASE_BACKOFF: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("document exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            FetchError::Status(status) => *status >= 500,
            FetchError::InvalidUrl { .. } | FetchError::TooLarge { .. } => false,
        }
    }
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_retries: u32, max_bytes: usize) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            max_retries,
            max_bytes,
        })
    }

    async fn fetch_once(&self, url: Url) -> Result<Bytes, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if buffer.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        Ok(buffer.freeze())
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed = parse_remote_url(url)?;

        let mut attempt = 0;
        loop {
            match self.fetch_once(parsed.clone()).await {
                Ok(bytes) => {
                    debug!("Fetched {} bytes from {url}", bytes.len());
                    return Ok(bytes);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Fetch of {url} failed ({e}), retry {attempt}/{} after {}ms",
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Exponential backoff for retry `attempt` (1-based): 250ms, 500ms, 1s, ...
/// capped at `MAX_BACKOFF` for any retry count.
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
    BASE_BACKOFF.saturating_mul(factor).min(MAX_BACKOFF)
}

/// Only absolute http/https URLs are fetched.
fn parse_remote_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{scheme}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(max_retries: u32, max_bytes: usize) -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), max_retries, max_bytes).unwrap()
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = parse_remote_url("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(parse_remote_url("resumes/alice.pdf").is_err());
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(1), Duration::from_millis(250));
        assert_eq!(backoff_delay(2), Duration::from_millis(500));
        assert_eq!(backoff_delay(3), Duration::from_secs(1));
        assert_eq!(backoff_delay(20), MAX_BACKOFF);
        assert_eq!(backoff_delay(64), MAX_BACKOFF);
        assert_eq!(backoff_delay(u32::MAX), MAX_BACKOFF);
    }

    #[tokio::test]
    async fn test_fetches_body_bytes() {
        let base = serve(Router::new().route("/cv.pdf", get(|| async { "%PDF-1.4 body" }))).await;
        let bytes = fetcher(0, 1024)
            .fetch(&format!("{base}/cv.pdf"))
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_not_found_is_failure_without_retry() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/missing.pdf",
                get(|State(hits): State<Arc<AtomicU32>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::NOT_FOUND
                }),
            )
            .with_state(hits.clone());
        let base = serve(router).await;

        let err = fetcher(2, 1024)
            .fetch(&format!("{base}/missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/flaky.pdf",
                get(|State(hits): State<Arc<AtomicU32>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    } else {
                        Ok("recovered")
                    }
                }),
            )
            .with_state(hits.clone());
        let base = serve(router).await;

        let bytes = fetcher(2, 1024)
            .fetch(&format!("{base}/flaky.pdf"))
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"recovered");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let base = serve(Router::new().route("/big.pdf", get(|| async { "x".repeat(4096) }))).await;
        let err = fetcher(0, 100)
            .fetch(&format!("{base}/big.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::TooLarge { limit: 100 }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetcher(0, 1024).fetch(&format!("http://{addr}/cv.pdf")).await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let router = Router::new().route(
            "/slow.pdf",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let base = serve(router).await;

        let fetcher = HttpFetcher::new(Duration::from_millis(100), 0, 1024).unwrap();
        let started = std::time::Instant::now();
        let err = fetcher.fetch(&format!("{base}/slow.pdf")).await.unwrap_err();

        match err {
            FetchError::Http(e) => assert!(e.is_timeout(), "expected a timeout, got {e}"),
            other => panic!("expected a transport timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
