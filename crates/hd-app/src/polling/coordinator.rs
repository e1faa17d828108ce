//! The one refresh path shared by scheduled polls, manual refresh and
//! filter changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hd_core::ports::{InboxSyncPort, TicketApiPort};
use hd_core::sync::SyncReport;
use hd_core::ticket::{TicketFilter, TicketQuery};
use hd_core::ApiError;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use super::board::TicketBoard;
use super::state::{PollPhase, PollState};

/// Result of the sync step of a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced(SyncReport),
    /// The mail integration is absent. Not shown to the user.
    NotConfigured,
    Failed(String),
}

impl SyncOutcome {
    pub fn inserted(&self) -> u64 {
        match self {
            SyncOutcome::Synced(report) => report.inserted,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub sync: SyncOutcome,
    /// Whether the refetched list replaced the displayed one.
    pub refreshed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Another cycle was still running; nothing happened.
    Skipped,
    Completed(RefreshOutcome),
}

pub struct RefreshCoordinator {
    tickets: Arc<dyn TicketApiPort>,
    inbox: Arc<dyn InboxSyncPort>,
    board: Arc<TicketBoard>,
    filter: watch::Sender<TicketFilter>,
    poll_state: PollState,
    list_limit: u32,
    seq: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new(
        tickets: Arc<dyn TicketApiPort>,
        inbox: Arc<dyn InboxSyncPort>,
        board: Arc<TicketBoard>,
        filter: TicketFilter,
        list_limit: u32,
    ) -> Self {
        let (filter, _) = watch::channel(filter);
        Self {
            tickets,
            inbox,
            board,
            filter,
            poll_state: PollState::new(),
            list_limit,
            seq: AtomicU64::new(0),
        }
    }

    pub fn board(&self) -> &Arc<TicketBoard> {
        &self.board
    }

    pub fn poll_phase(&self) -> PollPhase {
        self.poll_state.phase()
    }

    /// Current filters. Scheduled cycles read them at each firing.
    pub fn filter(&self) -> TicketFilter {
        self.filter.borrow().clone()
    }

    /// One scheduled cycle: sync, then refetch with the live filters.
    ///
    /// Returns [`CycleOutcome::Skipped`] without side effects if the
    /// previous cycle has not finished.
    pub async fn poll_cycle(&self) -> CycleOutcome {
        let Some(_guard) = self.poll_state.try_begin() else {
            debug!("previous poll cycle still running, skipping");
            return CycleOutcome::Skipped;
        };

        async move {
            let sync = match self.sync().await {
                Err(err) if !err.is_not_configured() => {
                    let message = err.user_message();
                    warn!(error = %message, "background sync failed");
                    self.board.set_error(message.clone());
                    SyncOutcome::Failed(message)
                }
                other => Self::outcome(other),
            };

            // The previous list stays on screen if this fails.
            let refreshed = match self.fetch(false).await {
                Ok(applied) => applied,
                Err(err) => {
                    debug!(error = %err, "background refetch failed");
                    false
                }
            };

            CycleOutcome::Completed(RefreshOutcome { sync, refreshed })
        }
        .instrument(info_span!("poll.cycle"))
        .await
    }

    /// User-initiated refresh: best-effort sync, then a visible reload.
    ///
    /// Does not touch the poll state, so it may overlap a scheduled cycle.
    /// The sequence check keeps the newest list on screen either way.
    pub async fn manual_refresh(&self) -> RefreshOutcome {
        async move {
            self.board.begin_visible_load();

            let sync = match self.sync().await {
                Err(err) if !err.is_not_configured() => {
                    warn!(error = %err, "manual sync failed");
                    SyncOutcome::Failed(err.user_message())
                }
                other => Self::outcome(other),
            };

            let inserted = sync.inserted();
            if inserted > 0 {
                info!(inserted, "new tickets imported from inbox");
                self.board
                    .set_notice(format!("Imported {inserted} new ticket(s) from the inbox"));
            }

            let refreshed = self.fetch(true).await.unwrap_or(false);
            self.board.set_loading(false);
            RefreshOutcome { sync, refreshed }
        }
        .instrument(info_span!("poll.manual_refresh"))
        .await
    }

    /// Visible reload with the current filters.
    pub async fn reload(&self) -> Result<bool, ApiError> {
        self.board.begin_visible_load();
        let result = self.fetch(true).await;
        self.board.set_loading(false);
        result
    }

    /// Replaces the filters and reloads.
    pub async fn apply_filter(&self, filter: TicketFilter) -> Result<bool, ApiError> {
        self.filter.send_replace(filter);
        self.reload().await
    }

    async fn sync(&self) -> Result<SyncReport, ApiError> {
        self.inbox.sync_inbox().await?.into_result()
    }

    fn outcome(result: Result<SyncReport, ApiError>) -> SyncOutcome {
        match result {
            Ok(report) => SyncOutcome::Synced(report),
            Err(err) if err.is_not_configured() => {
                debug!("mail integration not configured");
                SyncOutcome::NotConfigured
            }
            Err(err) => SyncOutcome::Failed(err.user_message()),
        }
    }

    /// Fetches the list and applies it if still current. A visible failure
    /// replaces the list with the empty state.
    async fn fetch(&self, visible: bool) -> Result<bool, ApiError> {
        let seq = self.seq.fetch_add(1, Ordering::AcqRel) + 1;
        let query = TicketQuery::new(self.filter()).limit(self.list_limit);

        match self.tickets.list_tickets(&query).await {
            Ok(page) => Ok(self.board.apply_page(seq, page)),
            Err(err) => {
                if visible {
                    self.board.fail_visible(seq, err.user_message());
                }
                Err(err)
            }
        }
    }
}
