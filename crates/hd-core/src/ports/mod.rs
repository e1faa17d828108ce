//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! implementations, so that the client logic stays independent of HTTP,
//! the filesystem and the wall clock.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port here, ask:
//!
//! 1. **Does this port represent a capability the use cases need?**
//! 2. **Will it be depended upon by more than one use case?**
//! 3. **Is it implemented by the infrastructure layer?**
//!
//! If all three answers are **yes**, place it in `hd-core/ports`.

pub mod admin_session;
pub mod analytics;
pub mod app_dirs;
pub mod assistant;
mod clock;
pub mod errors;
pub mod export;
pub mod inbox_sync;
pub mod key_value_store;
pub mod ticket_api;
mod uuid_source;

pub use admin_session::AdminSessionPort;
pub use analytics::AnalyticsPort;
pub use app_dirs::AppDirsPort;
pub use assistant::AssistantPort;
pub use clock::ClockPort;
pub use errors::{AppDirsError, ExportWriteError, KeyValueStoreError};
pub use export::{ExportWriterPort, TicketExportPort};
pub use inbox_sync::InboxSyncPort;
pub use key_value_store::KeyValueStorePort;
#[cfg(feature = "test-util")]
pub use key_value_store::MockKeyValueStore;
pub use ticket_api::TicketApiPort;
pub use uuid_source::UuidSourcePort;
