use async_trait::async_trait;
use hd_core::analytics::{OperatorStats, Share, SummaryStats, TimelinePoint};
use hd_core::ports::AnalyticsPort;
use hd_core::ApiError;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::client::HttpApiClient;

impl HttpApiClient {
    async fn analytics<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, ApiError> {
        let value: Option<T> = self
            .json(self.request(Method::GET, &format!("/api/analytics/{name}")))
            .await?;
        Ok(value.unwrap_or_default())
    }
}

#[async_trait]
impl AnalyticsPort for HttpApiClient {
    async fn summary(&self) -> Result<SummaryStats, ApiError> {
        self.analytics("summary").await
    }

    async fn by_category(&self) -> Result<Vec<Share>, ApiError> {
        self.analytics("by-category").await
    }

    async fn by_sentiment(&self) -> Result<Vec<Share>, ApiError> {
        self.analytics("by-sentiment").await
    }

    async fn by_source(&self) -> Result<Vec<Share>, ApiError> {
        self.analytics("by-source").await
    }

    async fn by_device_type(&self) -> Result<Vec<Share>, ApiError> {
        self.analytics("by-device-type").await
    }

    async fn timeline(&self, days: Option<u32>) -> Result<Vec<TimelinePoint>, ApiError> {
        let mut request = self.request(Method::GET, "/api/analytics/timeline");
        if let Some(days) = days.filter(|d| *d > 0) {
            request = request.query(&[("days", days)]);
        }
        let points: Option<Vec<TimelinePoint>> = self.json(request).await?;
        Ok(points.unwrap_or_default())
    }

    async fn operator_stats(&self) -> Result<OperatorStats, ApiError> {
        self.analytics("operator-stats").await
    }
}
