//! Reply published by a session for each command request.

use std::fmt;

/// Outcome of one request.
///
/// When `ok` is false the payload is a human-readable error message, never
/// partial command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Whether the request succeeded.
    pub ok: bool,

    /// Command output, or the error message.
    pub payload: String,
}

impl Response {
    /// Create a successful response.
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            ok: true,
            payload: payload.into(),
        }
    }

    /// Create a failed response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: message.into(),
        }
    }
}

impl From<Response> for (bool, String) {
    fn from(response: Response) -> Self {
        (response.ok, response.payload)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload)
    }
}
