//! Error types for the author finder.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the search engine HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by a search engine (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the engine
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Engine name has no configured endpoint
    #[error("Unknown search engine: {0}")]
    UnknownEngine(String),
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors surfaced by the search, listing and profile operations.
///
/// None of these are logged and swallowed internally; they always reach
/// the web layer, which decides what the user sees.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The fingerprint is absent from the cache (never written or expired).
    #[error("Search query has expired")]
    QueryExpired,

    /// A direct profile lookup missed the cache.
    #[error("Profile {id} is not cached")]
    ProfileExpired {
        /// The AuthorID that was requested
        id: String,
    },

    /// Listing page beyond the last page of the result set.
    #[error("Page {page} is out of range (last page is {pages})")]
    PageOutOfRange {
        /// Requested page
        page: u32,
        /// Number of pages in the result set
        pages: u32,
    },

    /// The search engines could not produce a result list.
    #[error("Aggregator failure: {0}")]
    Aggregator(#[from] ClientError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// A cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FinderError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a profile-expired error.
    #[must_use]
    pub fn profile_expired(id: impl Into<String>) -> Self {
        Self::ProfileExpired { id: id.into() }
    }

    /// Whether re-running the original search would clear this error.
    #[must_use]
    pub const fn needs_new_search(&self) -> bool {
        matches!(self, Self::QueryExpired | Self::ProfileExpired { .. })
    }

    /// Short machine-readable tag for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::QueryExpired => "query_expired",
            Self::ProfileExpired { .. } => "profile_expired",
            Self::PageOutOfRange { .. } => "page_out_of_range",
            Self::Aggregator(_) => "aggregator_failure",
            Self::Validation { .. } => "validation",
            Self::Serialization(_) => "serialization",
        }
    }

    /// HTTP status the web layer answers with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::QueryExpired => 410,
            Self::ProfileExpired { .. } | Self::PageOutOfRange { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Aggregator(_) => 502,
            Self::Serialization(_) => 500,
        }
    }

    /// Convert to a user-friendly message for the web layer.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::QueryExpired => "Your search query has expired!".to_string(),
            Self::ProfileExpired { .. } => "Profile is not cached on server".to_string(),
            Self::Aggregator(ClientError::RateLimited { retry_after }) => {
                format!("A search engine is rate limiting requests. Please wait {retry_after:?}.")
            }
            Self::Aggregator(ClientError::UnknownEngine(name)) => {
                format!("Unknown search engine: {name}")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for search, listing and profile operations.
pub type FinderResult<T> = Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(60).is_retryable());
        assert!(ClientError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(ClientError::server(500, "Internal error").is_retryable());

        assert!(!ClientError::not_found("engine").is_retryable());
        assert!(!ClientError::bad_request("invalid query").is_retryable());
        assert!(!ClientError::UnknownEngine("nope".into()).is_retryable());
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::not_found("engine");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_finder_error_user_message() {
        let err = FinderError::validation("years", "lower bound exceeds upper bound");
        assert!(err.to_user_message().contains("years"));
        assert!(err.to_user_message().contains("lower bound"));

        assert_eq!(FinderError::QueryExpired.to_user_message(), "Your search query has expired!");
    }

    #[test]
    fn test_needs_new_search() {
        assert!(FinderError::QueryExpired.needs_new_search());
        assert!(FinderError::profile_expired("a1-00").needs_new_search());
        assert!(!FinderError::PageOutOfRange { page: 4, pages: 2 }.needs_new_search());
        assert!(!FinderError::Aggregator(ClientError::server(503, "down")).needs_new_search());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(FinderError::QueryExpired.status_code(), 410);
        assert_eq!(FinderError::profile_expired("a1-00").status_code(), 404);
        assert_eq!(FinderError::PageOutOfRange { page: 3, pages: 2 }.status_code(), 404);
        assert_eq!(FinderError::validation("page", "zero").status_code(), 400);
        assert_eq!(FinderError::Aggregator(ClientError::Timeout(Duration::ZERO)).status_code(), 502);
    }

    #[test]
    fn test_aggregator_from_client_error() {
        let err: FinderError = ClientError::server(502, "bad gateway").into();
        assert_eq!(err.kind(), "aggregator_failure");
    }
}
