use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::export::{ExportFile, ExportFormat};
use crate::ports::errors::ExportWriteError;
use crate::ticket::TicketFilter;

/// Download an export of the tickets matching `filter`.
#[async_trait]
pub trait TicketExportPort: Send + Sync {
    async fn export(
        &self,
        format: ExportFormat,
        filter: &TicketFilter,
    ) -> Result<ExportFile, ApiError>;
}

/// Persist a downloaded export under a file name.
#[async_trait]
pub trait ExportWriterPort: Send + Sync {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportWriteError>;
}
