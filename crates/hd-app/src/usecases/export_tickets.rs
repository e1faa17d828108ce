use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use hd_core::export::ExportFormat;
use hd_core::ports::{ClockPort, ExportWriteError, ExportWriterPort, TicketExportPort};
use hd_core::ticket::TicketFilter;
use hd_core::ApiError;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export download failed: {0}")]
    Download(#[from] ApiError),

    #[error(transparent)]
    Write(#[from] ExportWriteError),
}

/// Downloads the tickets matching the current filters and saves them as
/// `tickets-YYYY-MM-DD.<ext>`.
pub struct ExportTickets {
    exporter: Arc<dyn TicketExportPort>,
    writer: Arc<dyn ExportWriterPort>,
    clock: Arc<dyn ClockPort>,
}

impl ExportTickets {
    pub fn new(
        exporter: Arc<dyn TicketExportPort>,
        writer: Arc<dyn ExportWriterPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            exporter,
            writer,
            clock,
        }
    }

    pub async fn execute(
        &self,
        format: ExportFormat,
        filter: &TicketFilter,
    ) -> Result<PathBuf, ExportError> {
        let span = info_span!("usecase.export_tickets.execute", format = format.extension());
        async move {
            let file = self.exporter.export(format, filter).await?;
            let file_name = format.file_name(self.today());
            let path = self.writer.write(&file_name, &file.bytes).await?;
            info!(path = %path.display(), bytes = file.bytes.len(), "export saved");
            Ok(path)
        }
        .instrument(span)
        .await
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms())
            .unwrap_or_default()
            .date_naive()
    }
}
