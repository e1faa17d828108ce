//! Read-only aggregate statistics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_tickets: u64,
    pub completed: u64,
    pub not_completed: u64,
    pub operator_required: u64,
    #[serde(default)]
    pub avg_response_hours: Option<f64>,
    pub today_tickets: u64,
    pub week_tickets: u64,
}

/// One slice of a breakdown (by category, sentiment, source or device type).
///
/// Each endpoint names the label column after the dimension; they all
/// decode into `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    #[serde(alias = "category", alias = "sentiment", alias = "source", alias = "device_type")]
    pub label: String,
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorStats {
    pub total_tickets: u64,
    pub requires_operator: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub by_reason: Vec<ReasonCount>,
}

/// Everything the analytics dashboard renders in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub summary: SummaryStats,
    pub by_category: Vec<Share>,
    pub by_sentiment: Vec<Share>,
    pub by_source: Vec<Share>,
    pub by_device_type: Vec<Share>,
    pub timeline: Vec<TimelinePoint>,
    pub operator: OperatorStats,
}

impl AnalyticsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.summary.total_tickets == 0
    }
}
