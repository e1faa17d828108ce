use std::sync::Arc;

use hd_core::analytics::AnalyticsSnapshot;
use hd_core::ports::AnalyticsPort;
use hd_core::ApiError;
use tracing::{debug, info_span, Instrument};

/// Timeline window requested by the dashboard, in days.
pub const DEFAULT_TIMELINE_DAYS: u32 = 30;

/// Fetches every aggregate the dashboard shows, concurrently.
/// The first failure fails the whole snapshot.
pub struct LoadAnalytics {
    analytics: Arc<dyn AnalyticsPort>,
}

impl LoadAnalytics {
    pub fn new(analytics: Arc<dyn AnalyticsPort>) -> Self {
        Self { analytics }
    }

    pub async fn execute(&self, timeline_days: Option<u32>) -> Result<AnalyticsSnapshot, ApiError> {
        let days = timeline_days.unwrap_or(DEFAULT_TIMELINE_DAYS);
        let port = self.analytics.as_ref();
        async move {
            let (summary, by_category, by_sentiment, by_source, by_device_type, timeline, operator) =
                tokio::try_join!(
                    port.summary(),
                    port.by_category(),
                    port.by_sentiment(),
                    port.by_source(),
                    port.by_device_type(),
                    port.timeline(Some(days)),
                    port.operator_stats(),
                )?;
            debug!(total = summary.total_tickets, "analytics loaded");
            Ok(AnalyticsSnapshot {
                summary,
                by_category,
                by_sentiment,
                by_source,
                by_device_type,
                timeline,
                operator,
            })
        }
        .instrument(info_span!("usecase.analytics.execute", days))
        .await
    }
}
