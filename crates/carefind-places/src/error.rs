use thiserror::Error;

/// Errors returned by place search, detail and geocoding clients.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS, timeout or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered with a non-OK envelope status.
    #[error("provider returned status {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// The provider asked us to slow down (`OVER_QUERY_LIMIT`).
    #[error("provider rate limit exceeded")]
    RateLimited,

    /// The call did not finish within its time bound.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u128 },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("geocoding query must not be empty")]
    EmptyQuery,

    #[error("no location found for '{query}'")]
    NoGeocodeMatch { query: String },
}
