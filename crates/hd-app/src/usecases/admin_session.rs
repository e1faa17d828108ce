//! Shared-code admin session.
//!
//! The admin flag is published on a `watch` channel. The admin view's
//! poller subscribes to it and stops as soon as the flag turns false.

use std::sync::Arc;

use hd_core::ports::AdminSessionPort;
use hd_core::{ApiError, ApiErrorKind};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Error)]
pub enum AdminSessionError {
    #[error("admin code must not be empty")]
    EmptyCode,

    #[error("admin code rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AdminSession {
    port: Arc<dyn AdminSessionPort>,
    flag: watch::Sender<bool>,
}

impl AdminSession {
    pub fn new(port: Arc<dyn AdminSessionPort>) -> Self {
        let (flag, _) = watch::channel(false);
        Self { port, flag }
    }

    pub async fn login(&self, code: &str) -> Result<(), AdminSessionError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AdminSessionError::EmptyCode);
        }

        async move {
            match self.port.login(code).await {
                Ok(()) => {
                    info!("admin session opened");
                    self.flag.send_replace(true);
                    Ok(())
                }
                Err(err) if err.kind() == ApiErrorKind::Unauthorized => {
                    self.flag.send_replace(false);
                    Err(AdminSessionError::Rejected(err.user_message()))
                }
                Err(err) => Err(err.into()),
            }
        }
        .instrument(info_span!("usecase.admin_session.login"))
        .await
    }

    /// Asks the server whether the session is still an admin session.
    /// Any failure counts as "not admin".
    pub async fn check(&self) -> bool {
        let is_admin = match self.port.check().await {
            Ok(is_admin) => is_admin,
            Err(err) => {
                warn!(error = %err, "admin check failed");
                false
            }
        };
        self.flag.send_replace(is_admin);
        is_admin
    }

    /// Best effort: the local flag is cleared even if the server call fails.
    pub async fn logout(&self) {
        if let Err(err) = self.port.logout().await {
            warn!(error = %err, "admin logout request failed");
        }
        self.flag.send_replace(false);
        info!("admin session closed");
    }

    pub fn is_admin(&self) -> bool {
        *self.flag.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }
}
