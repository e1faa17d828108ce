//! Scheduled inbox polling for the admin view.

use std::sync::Arc;
use std::time::Duration;

use hd_core::config::PollingConfig;
use hd_core::ports::{InboxSyncPort, TicketApiPort};
use hd_core::ticket::TicketFilter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use super::board::TicketBoard;
use super::coordinator::RefreshCoordinator;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Runs [`RefreshCoordinator::poll_cycle`] on a timer: once after
/// `initial_delay`, then every `interval`.
///
/// Each firing spawns its cycle, so a slow cycle never delays the timer.
/// Overlapping firings are dropped by the coordinator's poll state.
pub struct InboxPoller {
    coordinator: Arc<RefreshCoordinator>,
    initial_delay: Duration,
    interval: Duration,
}

impl InboxPoller {
    pub fn new(
        coordinator: Arc<RefreshCoordinator>,
        initial_delay: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            coordinator,
            initial_delay,
            interval,
        }
    }

    pub fn from_config(coordinator: Arc<RefreshCoordinator>, config: &PollingConfig) -> Self {
        Self::new(coordinator, config.initial_delay(), config.interval())
    }

    /// Starts polling while `admin` is true.
    ///
    /// Both timers are cancelled when the handle is stopped or dropped, or
    /// when the admin flag turns false (or its sender goes away).
    pub fn start(&self, admin: watch::Receiver<bool>) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(
            run(
                self.coordinator.clone(),
                self.initial_delay,
                self.interval,
                admin,
                cancel.clone(),
            )
            .instrument(tracing::info_span!("poll.timer")),
        );
        PollerHandle {
            cancel,
            task: Some(task),
        }
    }
}

async fn run(
    coordinator: Arc<RefreshCoordinator>,
    initial_delay: Duration,
    period: Duration,
    mut admin: watch::Receiver<bool>,
    cancel: CancellationToken,
) {
    let revoked = async move {
        // A closed channel can no longer grant admin either.
        let _ = admin.wait_for(|is_admin| !*is_admin).await;
    };
    tokio::pin!(revoked);

    info!(?initial_delay, ?period, "inbox polling started");

    tokio::select! {
        _ = cancel.cancelled() => return stopped("cancelled"),
        _ = &mut revoked => return stopped("admin revoked"),
        _ = tokio::time::sleep(initial_delay) => spawn_cycle(&coordinator),
    }

    let period = period.max(MIN_INTERVAL);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return stopped("cancelled"),
            _ = &mut revoked => return stopped("admin revoked"),
            _ = ticker.tick() => spawn_cycle(&coordinator),
        }
    }
}

fn spawn_cycle(coordinator: &Arc<RefreshCoordinator>) {
    let coordinator = coordinator.clone();
    tokio::spawn(async move {
        let outcome = coordinator.poll_cycle().await;
        debug!(?outcome, "poll cycle finished");
    });
}

fn stopped(reason: &'static str) {
    info!(reason, "inbox polling stopped");
}

/// Stops the poller when dropped.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
            || self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the timer task to exit. Does not stop it.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A mounted admin view: board, coordinator and its running poller.
///
/// Dropping it (or calling [`AdminWatch::unmount`]) stops the poller and
/// detaches the board, so in-flight responses are discarded.
pub struct AdminWatch {
    coordinator: Arc<RefreshCoordinator>,
    poller: PollerHandle,
}

impl AdminWatch {
    pub fn mount(
        tickets: Arc<dyn TicketApiPort>,
        inbox: Arc<dyn InboxSyncPort>,
        config: &PollingConfig,
        filter: TicketFilter,
        admin: watch::Receiver<bool>,
    ) -> Self {
        let board = Arc::new(TicketBoard::new());
        let coordinator = Arc::new(RefreshCoordinator::new(
            tickets,
            inbox,
            board,
            filter,
            config.list_limit,
        ));
        let poller = InboxPoller::from_config(coordinator.clone(), config).start(admin);
        Self {
            coordinator,
            poller,
        }
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    pub fn board(&self) -> &Arc<TicketBoard> {
        self.coordinator.board()
    }

    pub fn is_polling(&self) -> bool {
        !self.poller.is_stopped()
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for AdminWatch {
    fn drop(&mut self) {
        self.poller.stop();
        self.coordinator.board().detach();
    }
}
