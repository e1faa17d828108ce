use std::sync::Arc;

use hd_core::ports::TicketApiPort;
use hd_core::ticket::{Ticket, TicketFilter, TicketQuery, DEFAULT_LIST_LIMIT};
use hd_core::ApiError;
use tracing::{debug, info_span, Instrument};

use super::client_identity::ResolveClientToken;

/// Lists the tickets submitted from this profile.
pub struct ListMyTickets {
    tickets: Arc<dyn TicketApiPort>,
    identity: Arc<ResolveClientToken>,
}

impl ListMyTickets {
    pub fn new(tickets: Arc<dyn TicketApiPort>, identity: Arc<ResolveClientToken>) -> Self {
        Self { tickets, identity }
    }

    /// An unscoped request would return every ticket, so with no identity
    /// the result is empty and no request is made.
    pub async fn execute(&self, filter: TicketFilter) -> Result<Vec<Ticket>, ApiError> {
        let span = info_span!("usecase.list_my_tickets.execute");
        async move {
            let token = self.identity.execute();
            if token.is_empty() {
                debug!("no client token, skipping request");
                return Ok(Vec::new());
            }

            let query = TicketQuery::new(filter)
                .limit(DEFAULT_LIST_LIMIT)
                .scoped_to(token);
            let page = self.tickets.list_tickets(&query).await?;
            debug!(count = page.len(), "loaded own tickets");
            Ok(page.items)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{identity, no_storage_identity, ticket, FakeTicketApi};

    #[tokio::test]
    async fn query_is_scoped_and_limited() {
        let api = Arc::new(FakeTicketApi::with_tickets(vec![ticket(1, "mine")]));
        let usecase = ListMyTickets::new(api.clone(), identity("tok-a"));

        let tickets = usecase.execute(TicketFilter::default()).await.unwrap();
        assert_eq!(tickets.len(), 1);

        let queries = api.queries.lock().unwrap();
        let pairs = queries[0].query_pairs();
        assert!(pairs.contains(&("client_token", "tok-a".to_string())));
        assert!(pairs.contains(&("limit", "100".to_string())));
    }

    #[tokio::test]
    async fn empty_token_returns_empty_list_without_request() {
        let api = Arc::new(FakeTicketApi::with_tickets(vec![ticket(1, "someone else")]));
        let usecase = ListMyTickets::new(api.clone(), no_storage_identity());

        let tickets = usecase.execute(TicketFilter::default()).await.unwrap();

        assert!(tickets.is_empty());
        assert!(api.queries.lock().unwrap().is_empty());
    }
}
