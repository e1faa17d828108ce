//! Helpdesk application orchestration layer
//!
//! This crate contains the client use cases and the refresh/polling runtime
//! of the admin view. It depends only on `hd-core` ports.

pub mod deps;
pub mod polling;
pub mod usecases;

#[cfg(test)]
mod test_support;

pub use deps::AppDeps;
pub use polling::{
    AdminWatch, BoardSnapshot, CycleOutcome, InboxPoller, PollPhase, PollerHandle,
    RefreshCoordinator, RefreshOutcome, SyncOutcome, TicketBoard,
};
pub use usecases::{UseCases, Viewer};
