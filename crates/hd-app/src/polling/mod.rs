//! Admin view refresh runtime.
//!
//! ```text
//! InboxPoller (timer) ──┐
//! manual refresh ───────┼──> RefreshCoordinator ──> TicketBoard
//! filter change ────────┘        (seq numbers)      (liveness)
//! ```

mod board;
mod coordinator;
mod poller;
mod state;

pub use board::{BoardSnapshot, TicketBoard};
pub use coordinator::{CycleOutcome, RefreshCoordinator, RefreshOutcome, SyncOutcome};
pub use poller::{AdminWatch, InboxPoller, PollerHandle};
pub use state::{CycleGuard, PollPhase, PollState};
