use async_trait::async_trait;

use crate::analytics::{OperatorStats, Share, SummaryStats, TimelinePoint};
use crate::error::ApiError;

#[async_trait]
pub trait AnalyticsPort: Send + Sync {
    async fn summary(&self) -> Result<SummaryStats, ApiError>;
    async fn by_category(&self) -> Result<Vec<Share>, ApiError>;
    async fn by_sentiment(&self) -> Result<Vec<Share>, ApiError>;
    async fn by_source(&self) -> Result<Vec<Share>, ApiError>;
    async fn by_device_type(&self) -> Result<Vec<Share>, ApiError>;
    async fn timeline(&self, days: Option<u32>) -> Result<Vec<TimelinePoint>, ApiError>;
    async fn operator_stats(&self) -> Result<OperatorStats, ApiError>;
}
