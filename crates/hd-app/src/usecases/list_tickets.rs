use std::sync::Arc;

use hd_core::category::Category;
use hd_core::ports::TicketApiPort;
use hd_core::ticket::{TicketFilter, TicketPage, TicketQuery};
use hd_core::ApiError;
use tracing::{debug, info_span, Instrument};

/// Unscoped admin listing with filters and pagination.
pub struct ListTickets {
    tickets: Arc<dyn TicketApiPort>,
}

impl ListTickets {
    pub fn new(tickets: Arc<dyn TicketApiPort>) -> Self {
        Self { tickets }
    }

    pub async fn execute(
        &self,
        filter: TicketFilter,
        limit: u32,
        offset: u32,
    ) -> Result<TicketPage, ApiError> {
        let query = TicketQuery::new(filter).limit(limit).offset(offset);
        let page = self
            .tickets
            .list_tickets(&query)
            .instrument(info_span!("usecase.list_tickets.execute", limit, offset))
            .await?;
        debug!(count = page.len(), total = ?page.total, "tickets listed");
        Ok(page)
    }

    /// Category names used to label the listing.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.tickets.list_categories().await
    }
}
