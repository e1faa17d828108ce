//! Mailbox-to-ticket synchronization results.

use serde::{Deserialize, Serialize};

use crate::error::{mentions_not_configured, ApiError};

/// Response of the inbox synchronization endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl SyncReport {
    pub fn was_skipped(&self) -> bool {
        self.status.eq_ignore_ascii_case("skipped")
    }

    /// Scheduled sync endpoints answer `200 {"status":"skipped"}` instead of an
    /// error when the mailbox is absent. Fold that into the error channel so
    /// callers only have one place to recognize it.
    pub fn into_result(self) -> Result<SyncReport, ApiError> {
        if self.was_skipped() {
            if let Some(message) = self.message.as_deref().filter(|m| mentions_not_configured(m)) {
                return Err(ApiError::NotConfigured {
                    message: message.to_string(),
                });
            }
        }
        Ok(self)
    }
}
