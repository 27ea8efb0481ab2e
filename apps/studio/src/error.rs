//! # Studio Error Type
//!
//! Unified error type for studio commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Studio                             │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, StudioError>                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Config Error? ───── ConfigError::NotADirectory ──────┐                 │
//! │         │                                             │                 │
//! │         ▼                                             ▼                 │
//! │  Policy Error? ───── PolicyError::Invalid ───────► StudioError          │
//! │         │                                             │                 │
//! │         ▼                                             ▼                 │
//! │  Support Error? ──── SupportError::TicketNotFound   main.rs             │
//! │         │                                          eprintln!("[CODE]")  │
//! │         ▼                                          ExitCode             │
//! │  Success ──► stdout                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never fails, so there is no conversion for it.

use serde::Serialize;

use crate::state::{ConfigError, PolicyError, SupportError};

/// Error returned from studio commands.
///
/// ## Serialization
/// With `--json`, failures are printed to stderr as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Unknown policy '1999' (available: 2023, 2024, 2025)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for studio failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Named policy, ticket or task does not exist
    NotFound,

    /// Input or policy failed validation
    ValidationError,

    /// Policy file could not be parsed
    PolicyError,

    /// Environment configuration is unusable
    ConfigError,

    /// Reading or writing failed
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code. Never zero.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::NotFound => 2,
            ErrorCode::ValidationError => 3,
            ErrorCode::PolicyError => 4,
            ErrorCode::ConfigError => 5,
            ErrorCode::IoError => 6,
            ErrorCode::Internal => 1,
        }
    }
}

impl StudioError {
    /// Creates a new studio error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        StudioError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        StudioError::new(ErrorCode::Internal, message)
    }
}

/// Converts policy errors to studio errors.
impl From<PolicyError> for StudioError {
    fn from(err: PolicyError) -> Self {
        let code = match &err {
            PolicyError::Unknown { .. } => ErrorCode::NotFound,
            PolicyError::Io { .. } => ErrorCode::IoError,
            PolicyError::Parse { .. } => ErrorCode::PolicyError,
            PolicyError::Invalid { .. } => ErrorCode::ValidationError,
        };
        StudioError::new(code, err.to_string())
    }
}

/// Converts support board errors to studio errors.
impl From<SupportError> for StudioError {
    fn from(err: SupportError) -> Self {
        let code = match &err {
            SupportError::TicketNotFound(_) | SupportError::TaskNotFound { .. } => {
                ErrorCode::NotFound
            }
            SupportError::UnknownCommand(_) | SupportError::Usage(_) => {
                ErrorCode::ValidationError
            }
        };
        StudioError::new(code, err.to_string())
    }
}

impl From<ConfigError> for StudioError {
    fn from(err: ConfigError) -> Self {
        StudioError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for StudioError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failure: {}", err);
        StudioError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for StudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for StudioError {}

/// Result type for studio commands.
pub type StudioResult<T> = Result<T, StudioError>;
