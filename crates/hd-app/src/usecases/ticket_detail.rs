use std::sync::Arc;

use hd_core::attachment::TicketAttachment;
use hd_core::ids::TicketId;
use hd_core::ports::TicketApiPort;
use hd_core::ticket::Ticket;
use hd_core::ApiError;
use tracing::{info_span, warn, Instrument};

use super::client_identity::ResolveClientToken;
use super::Viewer;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub attachments: Vec<TicketAttachment>,
}

/// Loads one ticket with its attachments.
///
/// Clients are scoped by their token; admins read unscoped.
pub struct GetTicketDetail {
    tickets: Arc<dyn TicketApiPort>,
    identity: Arc<ResolveClientToken>,
}

impl GetTicketDetail {
    pub fn new(tickets: Arc<dyn TicketApiPort>, identity: Arc<ResolveClientToken>) -> Self {
        Self { tickets, identity }
    }

    pub async fn execute(&self, id: TicketId, viewer: Viewer) -> Result<TicketDetail, ApiError> {
        let span = info_span!("usecase.ticket_detail.execute", ticket_id = %id, ?viewer);
        async move {
            let token = match viewer {
                Viewer::Admin => None,
                Viewer::Client => Some(self.identity.execute()).filter(|t| !t.is_empty()),
            };

            let ticket = self.tickets.get_ticket(id, token.as_ref()).await?;

            // A missing attachment list should not hide the ticket itself.
            let attachments = match self.tickets.list_attachments(id, token.as_ref()).await {
                Ok(attachments) => attachments,
                Err(err) => {
                    warn!(error = %err, "loading attachments failed");
                    Vec::new()
                }
            };

            Ok(TicketDetail {
                ticket,
                attachments,
            })
        }
        .instrument(span)
        .await
    }
}
