use thiserror::Error;

/// Failure of one REST call. Stores surface these to the user as a single
/// human-readable message; callers get the variants for logging.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(String),
}
