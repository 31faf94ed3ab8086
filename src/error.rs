//! Error types for the WebSift SDK.

use thiserror::Error;

/// Errors that can occur when interacting with the WebSift API.
#[derive(Debug, Error)]
pub enum WebsiftError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The transport deadline for a request elapsed before a response arrived.
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The API answered but reported a failure.
    #[error("WebSift API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No API key was supplied via the builder or the environment.
    #[error("API key is required; set it via the builder or WEBSIFT_API_KEY")]
    MissingApiKey,

    /// A polled job did not finish within the waiting budget.
    #[error("Job {id} did not complete within {seconds}s")]
    JobTimeout { id: String, seconds: u64 },
}

impl WebsiftError {
    /// Classifies a transport error, keeping deadline expiry distinguishable
    /// from other network failures.
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            WebsiftError::Timeout(error)
        } else {
            WebsiftError::Network(error)
        }
    }
}
