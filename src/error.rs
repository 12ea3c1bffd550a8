//! Error types for the ofrenda client
//!
//! `ApiError` covers the `/data` boundary, `FormError` covers form encoding,
//! `ConfigError` covers environment configuration. `OfrendaError` wraps all three.

use thiserror::Error;

/// Main error type for the ofrenda client
#[derive(Error, Debug)]
pub enum OfrendaError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure of a `/data` API call.
///
/// Cloneable so results can travel inside `AppEvent`s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response carrying a structured `{"error": "..."}` payload
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx response without a usable error payload
    #[error("{status_text}")]
    Status { status: u16, status_text: String },

    /// Network unreachable, timeout, connection reset
    #[error("transport failure: {0}")]
    Transport(String),

    /// 2xx response whose body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// The API operation an error belongs to, used to pick the generic notice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "loading",
            Operation::Save => "saving",
            Operation::Delete => "deleting",
        }
    }
}

impl ApiError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::MalformedResponse(_) => None,
        }
    }

    /// True for failures where no application-level answer was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::MalformedResponse(_))
    }

    /// Text shown to the user for this failure.
    ///
    /// Structured rejections are surfaced verbatim, bare rejections fall back to
    /// the status text, transport failures get a generic per-operation notice.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Status { status_text, .. } => status_text.clone(),
            ApiError::Transport(_) | ApiError::MalformedResponse(_) => {
                format!("An error occurred while {}", operation.as_str())
            }
        }
    }
}

/// Form encoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("{field} must be a date (YYYY-MM-DD), got '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("form data does not describe an entry: {0}")]
    InvalidRecord(String),
}

/// Environment configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, OfrendaError>;
