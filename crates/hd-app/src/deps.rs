//! # Application Dependencies
//!
//! Dependency grouping for use case construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - No hidden logic
//! - Just parameter grouping

use std::sync::Arc;

use hd_core::ports::*;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required. `storage` is the one exception: `None`
/// models a context without persistent storage, in which the client token
/// resolves to the empty token.
#[derive(Clone)]
pub struct AppDeps {
    // Remote API
    pub tickets: Arc<dyn TicketApiPort>,
    pub inbox: Arc<dyn InboxSyncPort>,
    pub admin_session: Arc<dyn AdminSessionPort>,
    pub analytics: Arc<dyn AnalyticsPort>,
    pub assistant: Arc<dyn AssistantPort>,
    pub exporter: Arc<dyn TicketExportPort>,

    // Local
    pub storage: Option<Arc<dyn KeyValueStorePort>>,
    pub export_writer: Arc<dyn ExportWriterPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
    pub uuid_source: Arc<dyn UuidSourcePort>,
}
