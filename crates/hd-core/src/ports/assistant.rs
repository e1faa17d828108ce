use async_trait::async_trait;

use crate::assistant::{Ack, AiAnalysis, AnalyzeResponse, SuggestReplyResponse};
use crate::error::ApiError;
use crate::ids::TicketId;

/// AI endpoints. Entirely delegated to the backend.
#[async_trait]
pub trait AssistantPort: Send + Sync {
    async fn analyze_ticket(&self, id: TicketId) -> Result<AnalyzeResponse, ApiError>;
    async fn suggest_reply(&self, id: TicketId) -> Result<SuggestReplyResponse, ApiError>;
    async fn ai_analyze(&self, id: TicketId) -> Result<AiAnalysis, ApiError>;
    async fn send_reply(&self, id: TicketId, reply_text: &str) -> Result<Ack, ApiError>;
}
