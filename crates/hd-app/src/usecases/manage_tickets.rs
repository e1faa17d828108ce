//! Admin-side ticket maintenance.

use std::sync::Arc;

use hd_core::attachment::{AttachmentUpload, TicketAttachment};
use hd_core::ids::TicketId;
use hd_core::ports::TicketApiPort;
use hd_core::ticket::{Ticket, TicketPatch, ValidationError};
use hd_core::ApiError;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Error)]
pub enum ManageTicketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct ManageTickets {
    tickets: Arc<dyn TicketApiPort>,
}

impl ManageTickets {
    pub fn new(tickets: Arc<dyn TicketApiPort>) -> Self {
        Self { tickets }
    }

    pub async fn update(&self, id: TicketId, patch: TicketPatch) -> Result<Ticket, ManageTicketError> {
        patch.validate()?;
        let ticket = self
            .tickets
            .update_ticket(id, &patch)
            .instrument(info_span!("usecase.manage_tickets.update", ticket_id = %id))
            .await?;
        info!(ticket_id = %id, status = %ticket.status, "ticket updated");
        Ok(ticket)
    }

    pub async fn delete(&self, id: TicketId) -> Result<(), ManageTicketError> {
        self.tickets
            .delete_ticket(id, None)
            .instrument(info_span!("usecase.manage_tickets.delete", ticket_id = %id))
            .await?;
        info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }

    pub async fn upload(
        &self,
        id: TicketId,
        files: Vec<AttachmentUpload>,
    ) -> Result<Vec<TicketAttachment>, ManageTicketError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let stored = self
            .tickets
            .upload_attachments(id, files, None)
            .instrument(info_span!("usecase.manage_tickets.upload", ticket_id = %id))
            .await?;
        info!(ticket_id = %id, count = stored.len(), "attachments uploaded");
        Ok(stored)
    }

    /// Returns the server message.
    pub async fn seed_demo(&self) -> Result<String, ManageTicketError> {
        Ok(self
            .tickets
            .seed_demo()
            .instrument(info_span!("usecase.manage_tickets.seed_demo"))
            .await?)
    }
}
