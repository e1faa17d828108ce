//! AI assistance. The backend does all the work; this only forwards.

use std::sync::Arc;

use hd_core::assistant::{Ack, AiAnalysis, AnalyzeResponse, SuggestReplyResponse};
use hd_core::ids::TicketId;
use hd_core::ports::AssistantPort;
use hd_core::ApiError;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("reply text must not be empty")]
    EmptyReply,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AssistTicket {
    assistant: Arc<dyn AssistantPort>,
}

impl AssistTicket {
    pub fn new(assistant: Arc<dyn AssistantPort>) -> Self {
        Self { assistant }
    }

    pub async fn analyze(&self, id: TicketId) -> Result<AnalyzeResponse, AssistError> {
        let response = self
            .assistant
            .analyze_ticket(id)
            .instrument(info_span!("usecase.assist_ticket.analyze", ticket_id = %id))
            .await?;
        info!(
            ticket_id = %id,
            category = %response.predicted_category,
            confidence = response.confidence,
            "ticket analyzed"
        );
        Ok(response)
    }

    pub async fn suggest_reply(&self, id: TicketId) -> Result<SuggestReplyResponse, AssistError> {
        Ok(self
            .assistant
            .suggest_reply(id)
            .instrument(info_span!("usecase.assist_ticket.suggest_reply", ticket_id = %id))
            .await?)
    }

    pub async fn ai_analyze(&self, id: TicketId) -> Result<AiAnalysis, AssistError> {
        Ok(self
            .assistant
            .ai_analyze(id)
            .instrument(info_span!("usecase.assist_ticket.ai_analyze", ticket_id = %id))
            .await?)
    }

    pub async fn send_reply(&self, id: TicketId, reply_text: &str) -> Result<Ack, AssistError> {
        let reply_text = reply_text.trim();
        if reply_text.is_empty() {
            return Err(AssistError::EmptyReply);
        }
        let ack = self
            .assistant
            .send_reply(id, reply_text)
            .instrument(info_span!("usecase.assist_ticket.send_reply", ticket_id = %id))
            .await?;
        info!(ticket_id = %id, ok = ack.ok, "reply sent");
        Ok(ack)
    }
}
