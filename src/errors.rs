//! Error types for the coverage gate.
//!
//! Errors fall into two groups:
//!
//! - **Fatal** (`GateError::Config`, `GateError::Load`, `GateError::Io`):
//!   short-circuit the pipeline. The binary prints one error annotation and
//!   exits with status 1.
//! - **Non-fatal** (`GateError::RemoteReport`, [`ConfigWarning`]): handled at
//!   their local boundary, logged as warnings, and the pipeline continues with
//!   degraded behaviour.
//!
//! # Error Codes
//!
//! - E001-E009: I/O errors
//! - E020-E029: Configuration errors
//! - E030-E039: Coverage report loading errors
//! - E040-E049: Remote reporting errors

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");

    /// Config error - threshold outside the accepted range
    pub const CONFIG_THRESHOLD: ErrorCode = ErrorCode("E020");

    /// Load error - report file missing or unreadable
    pub const LOAD_NOT_FOUND: ErrorCode = ErrorCode("E030");
    /// Load error - report file is empty
    pub const LOAD_EMPTY: ErrorCode = ErrorCode("E031");
    /// Load error - report is not valid JSON
    pub const LOAD_SYNTAX: ErrorCode = ErrorCode("E032");
    /// Load error - report has an unexpected shape
    pub const LOAD_SHAPE: ErrorCode = ErrorCode("E033");

    /// Remote error - pull request context could not be resolved
    pub const REMOTE_CONTEXT: ErrorCode = ErrorCode("E040");
    /// Remote error - review API request failed
    pub const REMOTE_REQUEST: ErrorCode = ErrorCode("E041");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a coverage report could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    Empty,
    Syntax,
    Shape,
}

impl LoadErrorKind {
    fn code(self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::LOAD_NOT_FOUND,
            Self::Empty => ErrorCode::LOAD_EMPTY,
            Self::Syntax => ErrorCode::LOAD_SYNTAX,
            Self::Shape => ErrorCode::LOAD_SHAPE,
        }
    }
}

/// Main error type for coverage gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// Invalid required configuration (numeric thresholds)
    #[error("Invalid value for {option}: {message}")]
    Config { option: &'static str, message: String },

    /// The coverage report could not be loaded
    #[error("Failed to load coverage report {}: {message}", path.display())]
    Load {
        kind: LoadErrorKind,
        message: String,
        path: PathBuf,
    },

    /// Posting the review comment failed
    #[error("Could not report to pull request: {message}")]
    RemoteReport { code: ErrorCode, message: String },

    /// File system errors outside of report loading
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GateError {
    pub fn config(option: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            option,
            message: message.into(),
        }
    }

    pub fn load(kind: LoadErrorKind, message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Load {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Missing or incomplete pull request context.
    pub fn remote_context(message: impl Into<String>) -> Self {
        Self::RemoteReport {
            code: ErrorCode::REMOTE_CONTEXT,
            message: message.into(),
        }
    }

    /// Transport failure or non-2xx response from the review API.
    pub fn remote_request(message: impl Into<String>) -> Self {
        Self::RemoteReport {
            code: ErrorCode::REMOTE_REQUEST,
            message: message.into(),
        }
    }

    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::CONFIG_THRESHOLD,
            Self::Load { kind, .. } => kind.code(),
            Self::RemoteReport { code, .. } => *code,
            Self::Io { .. } => ErrorCode::IO_GENERIC,
        }
    }

    /// Whether this error must abort the pipeline.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RemoteReport { .. })
    }
}

/// A configuration value that was rejected and replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub option: &'static str,
    pub message: String,
}

impl ConfigWarning {
    pub fn new(option: &'static str, message: impl Into<String>) -> Self {
        Self {
            option,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.option, self.message)
    }
}
