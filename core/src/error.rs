//! Error types for the subscriptions API client.
//!
//! # Design
//! HTTP status codes are not an error here: any response whose body parses
//! as JSON is handed back to the caller, 4xx and 5xx included. What remains
//! are failures to reach the server or to read what it sent.

use thiserror::Error;

/// Errors returned by `SubscriptionClient` and `SubscriptionApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, DNS).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body is not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}
