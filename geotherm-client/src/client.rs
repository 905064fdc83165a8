//! HTTP-based `ScoringService` calling the `/api/score` endpoint.
//!
//! [`HttpScoringClient`] issues exactly one `POST` per call and never
//! retries. No timeout applies unless one is configured, so a slow service
//! keeps the request in flight until it answers.
//!
//! # Example
//!
//! ```no_run
//! use geotherm_client::HttpScoringClient;
//! use geotherm_core::{Coordinate, ScoringService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpScoringClient::new("http://localhost:5001")?;
//! let result = client.score(Coordinate::new(12.5, 77.2)).await?;
//! println!("score {}", result.score);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use geotherm_core::{Coordinate, ScoreError, ScoreResult, ScoringService};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::wire::{ErrorBody, ScoreRequest, ScoreResponse};

/// Base address of the local development scoring service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Path of the scoring endpoint relative to the base address.
pub const DEFAULT_SCORE_PATH: &str = "/api/score";

/// Default user agent for scoring requests.
pub const DEFAULT_USER_AGENT: &str = "geotherm-explorer/0.1";

/// Error type for [`HttpScoringClient`] construction failures.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The base URL and path did not form a valid absolute URL.
    #[error("invalid scoring endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// Endpoint assembled from the configuration.
        endpoint: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration for [`HttpScoringClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpScoringClientConfig {
    /// Base URL of the scoring service (e.g., `"http://localhost:5001"`).
    pub base_url: String,
    /// Endpoint path appended to `base_url`.
    pub score_path: String,
    /// Optional request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpScoringClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            score_path: DEFAULT_SCORE_PATH.to_owned(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpScoringClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the endpoint path.
    #[must_use]
    pub fn with_score_path(mut self, score_path: impl Into<String>) -> Self {
        self.score_path = score_path.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Join `base_url` and `score_path` with exactly one slash between them.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.score_path.trim_start_matches('/')
        )
    }
}

/// HTTP client for the geothermal scoring endpoint.
///
/// The client is cheap to share by reference; reqwest pools connections
/// internally. Calls must be made from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    config: HttpScoringClientConfig,
    endpoint: Url,
}

impl HttpScoringClient {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpScoringClientConfig::new(base_url))
    }

    /// Create a new client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpScoringClientConfig) -> Result<Self, ClientBuildError> {
        let raw = config.endpoint();
        let endpoint = Url::parse(&raw).map_err(|source| ClientBuildError::InvalidEndpoint {
            endpoint: raw,
            source,
        })?;
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Fully resolved endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpScoringClientConfig {
        &self.config
    }

    /// Convert a reqwest error to a `ScoreError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> ScoreError {
        let url = self.endpoint.to_string();
        if error.is_timeout() {
            return ScoreError::Timeout {
                url,
                timeout_ms: self.config.timeout.map_or(0, |timeout| {
                    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
                }),
            };
        }

        if let Some(status) = error.status() {
            return ScoreError::Http {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ScoreError::Network {
            url,
            message: error.to_string(),
        }
    }

    /// Turn a status and raw body into a result.
    fn convert_response(&self, status: StatusCode, body: &[u8]) -> Result<ScoreResult, ScoreError> {
        if !status.is_success() {
            return Err(ScoreError::Http {
                url: self.endpoint.to_string(),
                status: status.as_u16(),
                message: describe_failure(status, body),
            });
        }

        serde_json::from_slice::<ScoreResponse>(body)
            .map(ScoreResponse::into_result)
            .map_err(|err| ScoreError::Parse {
                message: err.to_string(),
            })
    }
}

/// Extract the reason from an error body, falling back to the status text.
fn describe_failure(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned()
        },
        |parsed| parsed.error,
    )
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        log::debug!("POST {} for {coordinate}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ScoreRequest::from(coordinate))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let result = self.convert_response(status, &body)?;
        log::debug!(
            "scored {coordinate}: {} ({})",
            result.score,
            result.feasible
        );
        Ok(result)
    }
}
