//! User-visible notices.
//!
//! Every mutation responds with a notice so no outcome is silent: a
//! success confirmation, an informational note (e.g. "Already in
//! wishlist"), or a failure message.

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A user-visible notice attached to a response.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// A success confirmation.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An informational (non-failure) note.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// A failure report.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_serialize_snake_case() {
        let notice = Notice::info("Already in wishlist");
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["message"], "Already in wishlist");
    }
}
