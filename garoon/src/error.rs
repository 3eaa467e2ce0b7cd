// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// Normalized representation of a failed call's response.
///
/// Built once per failed request and carried, immutable, inside
/// [`Error::Http`].
#[derive(Debug, Clone)]
pub struct ErrorEnvelope {
    /// Decoded response body, when one was received.
    pub data: Option<Value>,
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text (e.g. `"Not Found"`).
    pub status_text: String,
    /// Response headers, in wire order.
    pub headers: Vec<(String, String)>,
}

impl ErrorEnvelope {
    /// Extracts the most useful human-readable message from the envelope.
    ///
    /// Garoon reports errors as `{"message": "...", "errorCode": "..."}`;
    /// when the body doesn't match that shape the status line is used.
    #[must_use]
    pub fn message(&self) -> String {
        if let Some(data) = &self.data {
            if let Some(message) = data.get("message").and_then(Value::as_str) {
                return match data.get("errorCode").and_then(Value::as_str) {
                    Some(code) => format!("{message} [{code}]"),
                    None => message.to_string(),
                };
            }
        }
        format!("{} {}", self.status, self.status_text)
    }
}

/// Garoon client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration: bad base URL or missing credential fields.
    /// Raised at construction time, before any network activity.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {}: {}", .0.status, .0.message())]
    Http(ErrorEnvelope),

    /// Network-level failure with no response envelope.
    #[error("transport error: {0}")]
    Transport(String),

    /// A payload failed to serialize before any request was sent.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A 2xx response body did not decode into the expected shape.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}
