//! Error types module
//!
//! All failures a reviewer can run into are unified under `ClientError`.
//! The variants keep the failure source distinguishable (transport, server,
//! classification, conversion) so callers can pick how to present each one.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures like a rejected input
    Debug,
    /// Recoverable issues the user can act on
    Warn,
    /// Unexpected failures
    Error,
}

/// How a failure is presented to the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Blocking alert.
    Alert,
    /// Text placed inside the preview region, no alert.
    Inline,
    /// Logged only.
    LogOnly,
}

/// Metadata describing how an error should be presented.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether re-triggering the same user action may succeed
    fn is_recoverable(&self) -> bool;

    /// Default presentation; individual flows may override it
    fn surface(&self) -> Surface;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Reviewer-facing message
    fn user_message(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("Unknown error"))]
    Server {
        status: u16,
        /// `error` field of the JSON error body, when present.
        message: Option<String>,
    },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Unsupported file type: {content_type} ({filename})")]
    UnsupportedFileType {
        content_type: String,
        filename: String,
    },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No document is open for review")]
    NoOpenSession,

    #[error("Review of {document_id} was superseded")]
    StaleSession { document_id: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON parsing error: {}", err))
    }
}

impl ClientError {
    /// Server-provided message, if the failure came with one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, ClientError::StaleSession { .. })
    }
}

/// Static metadata for each variant: (error_code, recoverable, surface, log_level).
fn client_error_static_metadata(err: &ClientError) -> (&'static str, bool, Surface, LogLevel) {
    match err {
        ClientError::Transport(_) => ("TRANSPORT_ERROR", true, Surface::Alert, LogLevel::Error),
        ClientError::Server { status, .. } if *status >= 500 => {
            ("SERVER_ERROR", true, Surface::Alert, LogLevel::Error)
        }
        ClientError::Server { .. } => ("REQUEST_REJECTED", false, Surface::Alert, LogLevel::Warn),
        ClientError::Decode(_) => ("MALFORMED_RESPONSE", true, Surface::Alert, LogLevel::Error),
        ClientError::UnsupportedFileType { .. } => {
            ("UNSUPPORTED_FILE_TYPE", false, Surface::Alert, LogLevel::Warn)
        }
        ClientError::Conversion(_) => ("CONVERSION_ERROR", false, Surface::Inline, LogLevel::Warn),
        ClientError::Rendering(_) => ("RENDERING_ERROR", false, Surface::Alert, LogLevel::Warn),
        ClientError::InvalidInput(_) => ("INVALID_INPUT", false, Surface::Alert, LogLevel::Debug),
        ClientError::Io(_) => ("IO_ERROR", true, Surface::Alert, LogLevel::Error),
        ClientError::NoOpenSession => ("NO_OPEN_SESSION", false, Surface::LogOnly, LogLevel::Debug),
        ClientError::StaleSession { .. } => {
            ("STALE_SESSION", false, Surface::LogOnly, LogLevel::Debug)
        }
        ClientError::Config(_) => ("CONFIG_ERROR", false, Surface::Alert, LogLevel::Error),
    }
}

impl ErrorMetadata for ClientError {
    fn error_code(&self) -> &'static str {
        client_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        client_error_static_metadata(self).1
    }

    fn surface(&self) -> Surface {
        client_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        client_error_static_metadata(self).3
    }

    fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
            ClientError::UnsupportedFileType {
                content_type,
                filename,
            } => {
                let content_type = if content_type.is_empty() {
                    "no content type"
                } else {
                    content_type.as_str()
                };
                format!("Unsupported file type ({}, {})", content_type, filename)
            }
            ClientError::Transport(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Emit `err` through `tracing` at its own log level.
pub fn log_error(context: &str, err: &ClientError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code = err.error_code(), error = %err, "{}", context),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), error = %err, "{}", context),
        LogLevel::Error => tracing::error!(code = err.error_code(), error = %err, "{}", context),
    }
}
