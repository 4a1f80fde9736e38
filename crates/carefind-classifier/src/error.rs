use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but carried no answer text.
    #[error("classifier response had no answer text")]
    MissingAnswer,

    #[error("classification timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
