// Error types for webdriver-rs

use serde_json::Value;
use thiserror::Error;

/// Result type alias for webdriver-rs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving a remote element.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed call-site input
    ///
    /// The caller passed an argument the operation cannot act on, such as an
    /// empty key sequence or an upload path that is not a regular file.
    /// No remote command is issued for this failure.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Capability intentionally not offered
    ///
    /// The wire protocol has no realization of the requested operation
    /// (for example, on-screen coordinates).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Remote value did not match the expected shape
    ///
    /// Returned payloads are never silently coerced; a boolean probe that
    /// receives a string fails with this error, naming both shapes.
    #[error("cannot convert remote value: expected {expected}, got {actual}")]
    Conversion { expected: String, actual: String },

    /// Session/transport-level failure
    ///
    /// Raised by the session collaborator when a command cannot be executed
    /// remotely. Element operations annotate this error with the target
    /// element's description before re-signaling it.
    #[error("remote command failed: {message}{}", annotation(.element))]
    Remote {
        message: String,
        element: Option<String>,
    },

    /// Scripting failure reported by the remote session
    ///
    /// Kept distinct from [`Error::Remote`] so `submit()` can recognize it;
    /// every other operation propagates it unchanged.
    #[error("remote scripting failure: {0}")]
    Script(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Remote-kind error raised when a handle's session has been torn down.
    ///
    /// A handle keeps only a weak association to its session, so the session
    /// may be dropped first; operations on such a handle fail with this error
    /// rather than dangling.
    pub fn session_gone() -> Self {
        Error::Remote {
            message: "session has been torn down".to_string(),
            element: None,
        }
    }

    /// Conversion error describing the actual JSON payload that was received.
    pub(crate) fn conversion(expected: impl Into<String>, actual: &Value) -> Self {
        Error::Conversion {
            expected: expected.into(),
            actual: format!("{} ({})", json_type_name(actual), actual),
        }
    }
}

fn annotation(element: &Option<String>) -> String {
    match element {
        Some(description) => format!("; element: {description}"),
        None => String::new(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
