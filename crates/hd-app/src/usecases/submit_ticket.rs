//! Submit a new ticket from the client form.

use std::sync::Arc;

use hd_core::attachment::AttachmentUpload;
use hd_core::ports::TicketApiPort;
use hd_core::ticket::{Ticket, TicketDraft, ValidationError};
use hd_core::ApiError;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

use super::client_identity::ResolveClientToken;

#[derive(Debug, Error)]
pub enum SubmitTicketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to submit ticket: {0}")]
    Api(#[from] ApiError),
}

pub struct SubmitTicket {
    tickets: Arc<dyn TicketApiPort>,
    identity: Arc<ResolveClientToken>,
}

impl SubmitTicket {
    pub fn new(tickets: Arc<dyn TicketApiPort>, identity: Arc<ResolveClientToken>) -> Self {
        Self { tickets, identity }
    }

    /// Validates and sends `draft`, scoped to this profile's client token.
    ///
    /// Attachments are uploaded after the ticket exists. An upload failure
    /// does not undo the ticket; it is logged and the ticket is returned.
    pub async fn execute(
        &self,
        draft: TicketDraft,
        attachments: Vec<AttachmentUpload>,
    ) -> Result<Ticket, SubmitTicketError> {
        let span = info_span!("usecase.submit_ticket.execute", attachments = attachments.len());
        async move {
            let mut draft = draft.normalized();
            draft.validate()?;

            let token = self.identity.execute();
            draft.client_token = token.as_scope().map(str::to_string);

            let ticket = self.tickets.create_ticket(&draft).await?;
            info!(ticket_id = %ticket.id, scoped = draft.client_token.is_some(), "ticket submitted");

            if !attachments.is_empty() {
                let scope = (!token.is_empty()).then_some(&token);
                if let Err(err) = self
                    .tickets
                    .upload_attachments(ticket.id, attachments, scope)
                    .await
                {
                    warn!(ticket_id = %ticket.id, error = %err, "attachment upload failed");
                }
            }

            Ok(ticket)
        }
        .instrument(span)
        .await
    }
}
