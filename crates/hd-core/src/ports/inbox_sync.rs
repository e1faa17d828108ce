use async_trait::async_trait;

use crate::error::ApiError;
use crate::sync::SyncReport;

/// Trigger mailbox-to-ticket ingestion on the backend.
///
/// Fails with [`ApiError::NotConfigured`] when the mail integration is absent.
#[async_trait]
pub trait InboxSyncPort: Send + Sync {
    async fn sync_inbox(&self) -> Result<SyncReport, ApiError>;
}
