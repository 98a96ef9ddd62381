//! Search engine fan-out client.
//!
//! Provides the aggregator the search path depends on:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Fixed delay before every engine request
//! - Concurrent fan-out with results concatenated in sorted engine order

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::try_join_all;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, EngineEndpoint, defaults};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorRecord, QueryArguments};

/// Produces an ordered author list for a query across selected engines.
///
/// Either every selected engine answers and the concatenated list is
/// returned, or the call fails and nothing is returned.
#[async_trait::async_trait]
pub trait Aggregator: Send + Sync {
    /// Run the query against `engines`, in order.
    async fn aggregate(
        &self,
        arguments: &QueryArguments,
        engines: &[String],
    ) -> ClientResult<Vec<AuthorRecord>>;

    /// Whether `engine` can be selected.
    fn knows_engine(&self, _engine: &str) -> bool {
        true
    }
}

/// Aggregator that calls each engine's HTTP author search.
///
/// An engine answers `GET {base}/authors?{arguments}` with a JSON array of
/// author records.
#[derive(Clone)]
pub struct HttpAggregator {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Engine endpoints by name.
    engines: BTreeMap<String, EngineEndpoint>,

    /// Delay before each engine request.
    rate_limit_delay: Duration,

    /// Per-request timeout, reported back on expiry.
    request_timeout: Duration,
}

impl HttpAggregator {
    /// Create a new aggregator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(defaults::MAX_KEEPALIVE)
            .pool_idle_timeout(defaults::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
            .build_with_max_retries(2);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let engines =
            config.engines.iter().map(|e| (e.name.clone(), e.clone())).collect::<BTreeMap<_, _>>();

        Ok(Self {
            client,
            engines,
            rate_limit_delay: config.rate_limit_delay,
            request_timeout: config.request_timeout,
        })
    }

    /// Names of the configured engines, sorted.
    #[must_use]
    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.keys().map(String::as_str).collect()
    }

    /// Query one engine.
    async fn search_engine(
        &self,
        name: &str,
        params: &[(String, String)],
    ) -> ClientResult<Vec<AuthorRecord>> {
        let endpoint =
            self.engines.get(name).ok_or_else(|| ClientError::UnknownEngine(name.to_string()))?;
        let url = endpoint.authors_url();

        tokio::time::sleep(self.rate_limit_delay).await;

        tracing::debug!(engine = %name, url = %url, "Querying search engine");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.classify(e.into()))?;
        let response = self.handle_response(response).await?;

        let records: Vec<AuthorRecord> =
            response.json().await.map_err(|e| self.classify(e.into()))?;
        tracing::debug!(engine = %name, authors = records.len(), "Search engine answered");
        Ok(records)
    }

    /// Report transport timeouts as [`ClientError::Timeout`].
    fn classify(&self, error: ClientError) -> ClientError {
        let timed_out = match &error {
            ClientError::Http(e) => e.is_timeout(),
            ClientError::Middleware(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        };

        if timed_out { ClientError::Timeout(self.request_timeout) } else { error }
    }

    /// Handle engine response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl Aggregator for HttpAggregator {
    async fn aggregate(
        &self,
        arguments: &QueryArguments,
        engines: &[String],
    ) -> ClientResult<Vec<AuthorRecord>> {
        if let Some(unknown) = engines.iter().find(|e| !self.knows_engine(e)) {
            return Err(ClientError::UnknownEngine(unknown.clone()));
        }

        let params = arguments.to_params();
        let per_engine = try_join_all(engines.iter().map(|name| {
            let params = &params;
            async move {
                self.search_engine(name, params).await.inspect_err(|e| {
                    tracing::warn!(engine = %name, error = %e, "Search engine failed");
                })
            }
        }))
        .await?;

        Ok(per_engine.into_iter().flatten().collect())
    }

    fn knows_engine(&self, engine: &str) -> bool {
        self.engines.contains_key(engine)
    }
}

impl std::fmt::Debug for HttpAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAggregator").field("engines", &self.engine_names()).finish()
    }
}
