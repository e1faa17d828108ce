use std::sync::Arc;

use hd_core::ports::TicketApiPort;
use hd_core::ApiError;
use tracing::{info_span, Instrument};

/// Backend liveness probe.
pub struct CheckHealth {
    tickets: Arc<dyn TicketApiPort>,
}

impl CheckHealth {
    pub fn new(tickets: Arc<dyn TicketApiPort>) -> Self {
        Self { tickets }
    }

    pub async fn execute(&self) -> Result<String, ApiError> {
        self.tickets
            .health()
            .instrument(info_span!("usecase.health.execute"))
            .await
    }
}
