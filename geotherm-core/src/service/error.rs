use thiserror::Error;

/// Errors from [`crate::service::ScoringService::score`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The request never produced an HTTP response.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Endpoint that was called.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Endpoint that was called.
        url: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// The service answered with a non-success status code.
    #[error("scoring service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint that was called.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error text returned by the client library.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse scoring response: {message}")]
    Parse {
        /// Decoder error text.
        message: String,
    },
    /// The scorer had no usable data for the location.
    #[error("no score available at {location}: {message}")]
    Unavailable {
        /// Location that was requested, formatted as `(lat, lon)`.
        location: String,
        /// Explanation from the scorer.
        message: String,
    },
}
