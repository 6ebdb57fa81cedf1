//! HTTP feed client

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::source::{WaitTimeFeed, ensure_object};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Wait-time feed fetched over HTTP
///
/// One GET per [`fetch`](WaitTimeFeed::fetch), bounded by the configured
/// timeout. Failures are returned to the caller without retry.
#[derive(Clone)]
pub struct HttpFeed {
    inner: Client,
    config: Arc<FeedConfig>,
}

impl HttpFeed {
    /// Create a client configured from the environment
    pub fn new() -> FeedResult<Self> {
        Self::with_config(FeedConfig::from_env())
    }

    /// Create a client with specific configuration
    pub fn with_config(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| FeedError::config("user_agent is not a valid header value"))?;
        default_headers.insert(USER_AGENT, user_agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch the feed payload
    #[instrument(skip(self), fields(url = %self.config.url, request_id))]
    pub async fn fetch_payload(&self) -> FeedResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let response = self
            .inner
            .get(&self.config.url)
            .header(X_REQUEST_ID, &request_id)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Feed request failed"))?;

        let payload = self.handle_response(response).await?;
        debug!(elapsed_ms = start.elapsed().as_millis(), "Feed fetched");

        ensure_object(payload)
    }

    async fn handle_response(&self, response: Response) -> FeedResult<Value> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!(status = status.as_u16(), "Feed returned an error status");
            Err(FeedError::status(status.as_u16(), message))
        }
    }
}

impl WaitTimeFeed for HttpFeed {
    fn fetch(&self) -> impl Future<Output = FeedResult<Value>> + Send {
        self.fetch_payload()
    }
}
