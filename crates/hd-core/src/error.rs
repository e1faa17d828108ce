//! Errors returned by the remote API ports.

use thiserror::Error;

/// Message fragments the backend uses when an optional integration
/// (mailbox sync, admin code, AI provider) is absent.
///
/// The backend has no structured code for this condition, so the markers
/// are matched case-insensitively and promoted to
/// [`ApiErrorKind::NotConfigured`] in exactly one place.
pub const NOT_CONFIGURED_MARKERS: &[&str] = &["not configured", "не настроен"];

/// Returns true when `message` carries one of the [`NOT_CONFIGURED_MARKERS`].
pub fn mentions_not_configured(message: &str) -> bool {
    let lowered = message.to_lowercase();
    NOT_CONFIGURED_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("{0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The backend reported that an optional integration is missing.
    #[error("{message}")]
    NotConfigured { message: String },

    /// The response arrived but could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotConfigured,
    Unauthorized,
    NotFound,
    Transport,
    Other,
}

impl ApiError {
    /// Builds an error from a non-success response.
    ///
    /// The message is the FastAPI `detail` string when present, otherwise the
    /// raw body, otherwise `HTTP <status>`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        });

        if mentions_not_configured(&message) {
            ApiError::NotConfigured { message }
        } else {
            ApiError::Http { status, message }
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::NotConfigured { .. } => ApiErrorKind::NotConfigured,
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::Http { status: 401 | 403, .. } => ApiErrorKind::Unauthorized,
            ApiError::Http { status: 404, .. } => ApiErrorKind::NotFound,
            ApiError::Http { .. } | ApiError::Decode(_) => ApiErrorKind::Other,
        }
    }

    pub fn is_not_configured(&self) -> bool {
        self.kind() == ApiErrorKind::NotConfigured
    }

    /// Human readable text shown in the page-level error slot.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}
