//! Rephrase Error Types
//!
//! Centralized error handling for the editor, the controller and the
//! paraphrase backends.

use thiserror::Error;

/// Central error type for Rephrase
#[derive(Error, Debug)]
pub enum RephraseError {
    #[error("no text selected")]
    EmptySelection,

    #[error("a paraphrase request is already in flight")]
    Busy,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("paraphrase service returned HTTP {0}")]
    Status(u16),

    #[error("invalid response from paraphrase service: {0}")]
    InvalidResponse(String),

    #[error("paraphrase failed: {0}")]
    Service(String),

    #[error("range {start}..{end} is outside a document of {len} characters")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Rephrase operations
pub type RephraseResult<T> = Result<T, RephraseError>;

impl From<reqwest::Error> for RephraseError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RephraseError::Status(status.as_u16())
        } else if err.is_decode() {
            RephraseError::InvalidResponse(err.to_string())
        } else {
            RephraseError::Transport(err.to_string())
        }
    }
}

impl RephraseError {
    /// Whether the error came from the paraphrase call rather than local state
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            RephraseError::Transport(_)
                | RephraseError::Status(_)
                | RephraseError::InvalidResponse(_)
                | RephraseError::Service(_)
        )
    }
}
