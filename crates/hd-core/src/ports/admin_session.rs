use async_trait::async_trait;

use crate::error::ApiError;

/// Shared-code admin session.
#[async_trait]
pub trait AdminSessionPort: Send + Sync {
    async fn login(&self, code: &str) -> Result<(), ApiError>;

    /// `Ok(true)` when the current session is an admin session.
    async fn check(&self) -> Result<bool, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;
}
