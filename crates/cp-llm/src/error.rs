use std::fmt;

/// Typed error for completion streaming operations.
///
/// Distinguishes error categories (network, API, stream read, parse,
/// cancellation) without losing context.
#[derive(Debug)]
pub enum LlmError {
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// Endpoint returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Error reading from the response body
    StreamRead(String),
    /// Failed to parse an event line's JSON payload
    Parse(String),
    /// The session's cancellation scope fired mid-stream
    Cancelled,
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            LlmError::StreamRead(msg) => write!(f, "Stream read error: {}", msg),
            LlmError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LlmError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Network(e.to_string())
    }
}

impl LlmError {
    /// Cancellation is a clean termination, not a user-facing failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LlmError::Cancelled)
    }
}
