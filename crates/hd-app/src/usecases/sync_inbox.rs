use std::sync::Arc;

use hd_core::ports::InboxSyncPort;
use hd_core::sync::SyncReport;
use hd_core::ApiError;
use tracing::{info, info_span, Instrument};

/// One on-demand mailbox sync.
///
/// "Skipped because unconfigured" reports come back as
/// [`ApiError::NotConfigured`], like an explicit error response would.
pub struct SyncInbox {
    inbox: Arc<dyn InboxSyncPort>,
}

impl SyncInbox {
    pub fn new(inbox: Arc<dyn InboxSyncPort>) -> Self {
        Self { inbox }
    }

    pub async fn execute(&self) -> Result<SyncReport, ApiError> {
        async move {
            let report = self.inbox.sync_inbox().await?.into_result()?;
            info!(
                processed = report.processed,
                inserted = report.inserted,
                skipped = report.skipped,
                "inbox synced"
            );
            Ok(report)
        }
        .instrument(info_span!("usecase.sync_inbox.execute"))
        .await
    }
}
