//! Error types for the KeyWarden client.
//!
//! Every remote operation is classified into one of four failure modes so
//! callers (and tests) can tell a network outage apart from a rejected
//! request. The sentinel-shaped convenience methods on the client components
//! collapse these back down to `None` / `false` / `-1` at the public
//! boundary.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure classification for a single API call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network-level error or a non-2xx HTTP status. The status code is not
    /// preserved; all transport problems collapse into one signal.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered 2xx but the body was empty.
    #[error("service returned an empty response body")]
    EmptyBody,

    /// The body was present but could not be interpreted: invalid JSON, a
    /// non-object payload, or a missing/mistyped envelope field.
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// A well-formed response that explicitly reports the operation was not
    /// performed (e.g. an unexpected `message` from `update_app_key`).
    #[error("operation rejected by service: {0}")]
    Rejected(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a `MalformedEnvelope` error for a missing or mistyped field.
    pub(crate) fn missing_field(key: &str, expected: &str) -> Self {
        ApiError::MalformedEnvelope(format!(
            "missing or mistyped field `{key}` (expected {expected})"
        ))
    }
}
