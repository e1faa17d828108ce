//! Displayed ticket collection of one admin view.

use hd_core::ticket::{Ticket, TicketPage};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What the admin view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub tickets: Vec<Ticket>,
    pub total: Option<u64>,
    /// Page-level error banner.
    pub error: Option<String>,
    pub loading: bool,
    /// Transient informational message, e.g. how many tickets a refresh imported.
    pub notice: Option<String>,
    /// Sequence number of the list response currently shown. `0` before the first load.
    pub revision: u64,
}

/// Owner of the displayed collection.
///
/// Every mutation is a no-op once the board is detached, so responses that
/// arrive after the view went away are dropped. List responses are applied
/// only if their sequence number is not older than the one already shown.
#[derive(Debug)]
pub struct TicketBoard {
    state: watch::Sender<BoardSnapshot>,
    alive: CancellationToken,
}

impl Default for TicketBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketBoard {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BoardSnapshot::default());
        Self {
            state,
            alive: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.state.subscribe()
    }

    pub fn is_alive(&self) -> bool {
        !self.alive.is_cancelled()
    }

    /// Marks the view as gone. Later updates are discarded.
    pub fn detach(&self) {
        self.alive.cancel();
    }

    /// Replaces the shown tickets with `page` unless a newer response
    /// is already shown. Returns whether the page was applied.
    pub fn apply_page(&self, seq: u64, page: TicketPage) -> bool {
        if !self.is_alive() {
            debug!(seq, "board detached, dropping list response");
            return false;
        }
        let applied = self.state.send_if_modified(|state| {
            if seq < state.revision {
                return false;
            }
            state.tickets = page.items;
            state.total = page.total;
            state.revision = seq;
            true
        });
        if !applied {
            debug!(seq, "dropping stale list response");
        }
        applied
    }

    /// A visible load failed: show the empty state with the error, unless
    /// a newer response is already shown.
    pub fn fail_visible(&self, seq: u64, message: String) -> bool {
        self.update(|state| {
            if seq < state.revision {
                return false;
            }
            state.tickets.clear();
            state.total = None;
            state.error = Some(message);
            state.revision = seq;
            true
        })
    }

    /// Starts a visible load: raises the loading flag and clears the banner.
    pub fn begin_visible_load(&self) {
        self.update(|state| {
            state.loading = true;
            state.error = None;
            true
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| {
            state.error = Some(message);
            true
        });
    }

    pub fn dismiss_error(&self) {
        self.update(|state| state.error.take().is_some());
    }

    pub fn set_notice(&self, notice: impl Into<String>) {
        let notice = notice.into();
        self.update(|state| {
            state.notice = Some(notice);
            true
        });
    }

    pub fn dismiss_notice(&self) {
        self.update(|state| state.notice.take().is_some());
    }

    fn update(&self, modify: impl FnOnce(&mut BoardSnapshot) -> bool) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state.send_if_modified(modify)
    }
}
