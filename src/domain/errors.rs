use crate::domain::validation::FieldErrors;
use thiserror::Error;

/// Domain error type
#[derive(Error, Debug)]
pub enum DomainError {
    /// Page-embedded configuration missing or malformed, or bad environment
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The payment provider rejected a request or returned an unusable payload
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// The origin server answered with a non-success status
    #[error("Server rejected request with status {status}: {body}")]
    ServerRejection { status: u16, body: String },

    /// Field-level validation failure (HTTP 422)
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Operation invoked in the wrong flow state
    #[error("Invalid flow state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Amount text that is not an exact currency value
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// HTTP transport error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Text forwarded to the shared error path.
    ///
    /// Server rejections forward the response body verbatim so the page shows
    /// exactly what the origin said.
    pub fn report_text(&self) -> String {
        match self {
            DomainError::ServerRejection { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
