use async_trait::async_trait;
use hd_core::attachment::{AttachmentUpload, TicketAttachment};
use hd_core::category::Category;
use hd_core::client_identity::ClientToken;
use hd_core::ids::TicketId;
use hd_core::ports::TicketApiPort;
use hd_core::ticket::{Ticket, TicketDraft, TicketPage, TicketPatch, TicketQuery};
use hd_core::ApiError;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use super::client::{scope_query, HttpApiClient};

#[derive(Deserialize)]
struct SeedResponse {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: String,
}

#[async_trait]
impl TicketApiPort for HttpApiClient {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError> {
        let request = self
            .request(Method::GET, "/api/tickets")
            .query(&query.query_pairs());
        self.json(request).await
    }

    async fn get_ticket(
        &self,
        id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<Ticket, ApiError> {
        let request = self
            .request(Method::GET, &format!("/api/tickets/{id}"))
            .query(&scope_query(scope));
        self.json(request).await
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket, ApiError> {
        let request = self.request(Method::POST, "/api/tickets").json(draft);
        self.json(request).await
    }

    async fn update_ticket(&self, id: TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError> {
        let request = self
            .request(Method::PATCH, &format!("/api/tickets/{id}"))
            .json(patch);
        self.json(request).await
    }

    async fn delete_ticket(
        &self,
        id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<(), ApiError> {
        let request = self
            .request(Method::DELETE, &format!("/api/tickets/{id}"))
            .query(&scope_query(scope));
        self.send(request).await?;
        Ok(())
    }

    async fn list_attachments(
        &self,
        id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        let request = self
            .request(Method::GET, &format!("/api/tickets/{id}/attachments"))
            .query(&scope_query(scope));
        let attachments: Option<Vec<TicketAttachment>> = self.json(request).await?;
        Ok(attachments.unwrap_or_default())
    }

    async fn upload_attachments(
        &self,
        id: TicketId,
        files: Vec<AttachmentUpload>,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| ApiError::Decode(format!("invalid MIME type {}: {e}", file.mime_type)))?;
            form = form.part("files", part);
        }

        let request = self
            .request(Method::POST, &format!("/api/tickets/{id}/attachments"))
            .query(&scope_query(scope))
            .multipart(form);
        let stored: Option<Vec<TicketAttachment>> = self.json(request).await?;
        Ok(stored.unwrap_or_default())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let categories: Option<Vec<Category>> =
            self.json(self.request(Method::GET, "/api/categories")).await?;
        Ok(categories.unwrap_or_default())
    }

    async fn seed_demo(&self) -> Result<String, ApiError> {
        let response: Option<SeedResponse> =
            self.json(self.request(Method::POST, "/api/seed-demo")).await?;
        Ok(response.map(|r| r.message).unwrap_or_default())
    }

    async fn health(&self) -> Result<String, ApiError> {
        let response: Option<HealthResponse> =
            self.json(self.request(Method::GET, "/health")).await?;
        Ok(response.map(|r| r.status).unwrap_or_default())
    }
}
