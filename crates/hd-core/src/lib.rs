//! # hd-core
//!
//! Core domain models and business rules for the helpdesk client.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.
//! Everything that talks to the network or the filesystem lives behind the
//! traits in [`ports`].

pub mod analytics;
pub mod app_dirs;
pub mod assistant;
pub mod attachment;
pub mod category;
pub mod client_identity;
pub mod config;
pub mod error;
pub mod export;
pub mod ids;
pub mod ports;
pub mod sync;
pub mod ticket;

// Re-export commonly used types at the crate root
pub use client_identity::{ClientToken, CLIENT_TOKEN_KEY, LEGACY_CLIENT_TOKEN_KEY};
pub use config::AppConfig;
pub use error::{ApiError, ApiErrorKind};
pub use ids::{CategoryId, TicketId};
pub use sync::SyncReport;
pub use ticket::{Ticket, TicketDraft, TicketFilter, TicketPage, TicketPatch, TicketQuery, TicketView};
