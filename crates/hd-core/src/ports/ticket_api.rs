use async_trait::async_trait;

use crate::attachment::{AttachmentUpload, TicketAttachment};
use crate::category::Category;
use crate::client_identity::ClientToken;
use crate::error::ApiError;
use crate::ids::TicketId;
use crate::ticket::{Ticket, TicketDraft, TicketPage, TicketPatch, TicketQuery};

/// Ticket CRUD against the backend.
///
/// `scope` carries the anonymous client token; implementations must not
/// send the empty token (see [`ClientToken::as_scope`]).
#[async_trait]
pub trait TicketApiPort: Send + Sync {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError>;

    async fn get_ticket(
        &self,
        id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<Ticket, ApiError>;

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket, ApiError>;

    async fn update_ticket(&self, id: TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError>;

    async fn delete_ticket(&self, id: TicketId, scope: Option<&ClientToken>)
        -> Result<(), ApiError>;

    async fn list_attachments(
        &self,
        id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError>;

    async fn upload_attachments(
        &self,
        id: TicketId,
        files: Vec<AttachmentUpload>,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Populate the backend with demo tickets. Returns the server message.
    async fn seed_demo(&self) -> Result<String, ApiError>;

    /// Backend liveness. Returns the reported status string.
    async fn health(&self) -> Result<String, ApiError>;
}
