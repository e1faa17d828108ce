//! AI results. Produced entirely by the backend; the client only displays them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub predicted_category: String,
    pub confidence: f64,
    pub provider: String,
    pub model_version: String,
    pub analysis_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestReplyResponse {
    pub suggested_reply: String,
    pub provider: String,
    pub model_version: String,
    pub analysis_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub ai_category: String,
    pub ai_reply: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}
