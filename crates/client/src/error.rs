use engine::EngineError;
use thiserror::Error;

/// Errors of the REST client.
///
/// `RequestFailed` carries the message the server put in the error body, so it
/// can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error("No data in response")]
    EmptyResponse,
    #[error("{0}")]
    InvalidResponse(String),
    #[error("session expired, please sign in again")]
    AuthExpired,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<EngineError> for ClientError {
    fn from(value: EngineError) -> Self {
        Self::Validation(value.to_string())
    }
}
