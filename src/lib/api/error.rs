use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the scheduling backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {path}: {body}")]
    Status {
        status: StatusCode,
        path: String,
        body: String,
    },

    #[error("Token storage error: {0}")]
    TokenIo(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
