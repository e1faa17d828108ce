use async_trait::async_trait;
use hd_core::assistant::{Ack, AiAnalysis, AnalyzeResponse, SuggestReplyResponse};
use hd_core::ids::TicketId;
use hd_core::ports::AssistantPort;
use hd_core::ApiError;
use reqwest::Method;
use serde_json::json;

use super::client::HttpApiClient;

#[async_trait]
impl AssistantPort for HttpApiClient {
    async fn analyze_ticket(&self, id: TicketId) -> Result<AnalyzeResponse, ApiError> {
        self.json(self.request(Method::POST, &format!("/api/tickets/{id}/analyze")))
            .await
    }

    async fn suggest_reply(&self, id: TicketId) -> Result<SuggestReplyResponse, ApiError> {
        self.json(self.request(Method::POST, &format!("/api/tickets/{id}/suggest-reply")))
            .await
    }

    async fn ai_analyze(&self, id: TicketId) -> Result<AiAnalysis, ApiError> {
        self.json(self.request(Method::POST, &format!("/api/ai/analyze/{id}")))
            .await
    }

    async fn send_reply(&self, id: TicketId, reply_text: &str) -> Result<Ack, ApiError> {
        let request = self
            .request(Method::POST, &format!("/api/ai/send-reply/{id}"))
            .json(&json!({ "reply_text": reply_text }));
        let ack: Option<Ack> = self.json(request).await?;
        Ok(ack.unwrap_or_default())
    }
}
