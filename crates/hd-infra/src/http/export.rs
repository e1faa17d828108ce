use async_trait::async_trait;
use hd_core::export::{ExportFile, ExportFormat};
use hd_core::ports::TicketExportPort;
use hd_core::ticket::TicketFilter;
use hd_core::ApiError;
use reqwest::Method;

use super::client::{transport_error, HttpApiClient};

#[async_trait]
impl TicketExportPort for HttpApiClient {
    async fn export(
        &self,
        format: ExportFormat,
        filter: &TicketFilter,
    ) -> Result<ExportFile, ApiError> {
        let request = self
            .request(Method::GET, &format.endpoint())
            .query(&filter.query_pairs());
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(ExportFile {
            format,
            bytes: bytes.to_vec(),
        })
    }
}
