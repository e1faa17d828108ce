use async_trait::async_trait;
use hd_core::ports::{AdminSessionPort, InboxSyncPort};
use hd_core::sync::SyncReport;
use hd_core::{ApiError, ApiErrorKind};
use reqwest::Method;
use serde_json::json;

use super::client::HttpApiClient;

#[async_trait]
impl AdminSessionPort for HttpApiClient {
    async fn login(&self, code: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, "/api/admin/login")
            .json(&json!({ "code": code.trim() }));
        let response = self.send(request).await?;
        self.remember_cookie(response.headers());
        Ok(())
    }

    /// 200 means admin; 401/403 mean "not admin" rather than a failure.
    async fn check(&self) -> Result<bool, ApiError> {
        match self.send(self.request(Method::GET, "/api/admin/check")).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ApiErrorKind::Unauthorized => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .send(self.request(Method::POST, "/api/admin/logout"))
            .await;
        // The local session ends even if the server could not be told.
        self.forget_cookie();
        result.map(|_| ())
    }
}

#[async_trait]
impl InboxSyncPort for HttpApiClient {
    async fn sync_inbox(&self) -> Result<SyncReport, ApiError> {
        let report: Option<SyncReport> =
            self.json(self.request(Method::POST, "/api/email/fetch")).await?;
        Ok(report.unwrap_or_default())
    }
}
