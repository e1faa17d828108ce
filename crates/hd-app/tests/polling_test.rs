//! Timing and ordering contracts of the admin view refresh runtime.
//!
//! All tests run on a paused clock: `sleep` in the test body auto-advances
//! through every timer in between, so the poller's firings happen at exact
//! virtual instants.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hd_app::{
    AdminWatch, CycleOutcome, InboxPoller, PollPhase, RefreshCoordinator, SyncOutcome,
    TicketBoard,
};
use hd_core::attachment::{AttachmentUpload, TicketAttachment};
use hd_core::category::Category;
use hd_core::client_identity::ClientToken;
use hd_core::config::PollingConfig;
use hd_core::ids::TicketId;
use hd_core::ports::{InboxSyncPort, TicketApiPort};
use hd_core::sync::SyncReport;
use hd_core::ticket::{Ticket, TicketDraft, TicketFilter, TicketPage, TicketPatch, TicketQuery};
use hd_core::ApiError;
use tokio::sync::watch;
use tokio::time::sleep;

#[derive(Clone)]
enum SyncBehavior {
    Report(SyncReport),
    Fail(ApiError),
}

struct FakeInbox {
    calls: AtomicUsize,
    completed: AtomicUsize,
    delay: Duration,
    behavior: SyncBehavior,
}

impl FakeInbox {
    fn ok() -> Self {
        Self::with(SyncBehavior::Report(SyncReport {
            status: "ok".into(),
            ..Default::default()
        }))
    }

    fn with(behavior: SyncBehavior) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            delay: Duration::ZERO,
            behavior,
        }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InboxSyncPort for FakeInbox {
    async fn sync_inbox(&self) -> Result<SyncReport, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            SyncBehavior::Report(report) => Ok(report.clone()),
            SyncBehavior::Fail(err) => Err(err.clone()),
        }
    }
}

/// List endpoint that answers call `n` with a single ticket of id `n`.
#[derive(Default)]
struct FakeTickets {
    calls: AtomicUsize,
    queries: Mutex<Vec<TicketQuery>>,
    delays: Mutex<VecDeque<Duration>>,
    fail: AtomicBool,
}

impl FakeTickets {
    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> TicketQuery {
        self.queries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one list call")
    }
}

fn ticket(id: i64) -> Ticket {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "sender_email": "client@example.com",
        "subject": format!("ticket {id}"),
        "body": "body",
    }))
    .expect("valid ticket json")
}

#[async_trait]
impl TicketApiPort for FakeTickets {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.clone());
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("cannot reach server".into()));
        }
        Ok(TicketPage {
            items: vec![ticket(n as i64)],
            total: Some(1),
        })
    }

    async fn get_ticket(&self, _: TicketId, _: Option<&ClientToken>) -> Result<Ticket, ApiError> {
        unimplemented!()
    }

    async fn create_ticket(&self, _: &TicketDraft) -> Result<Ticket, ApiError> {
        unimplemented!()
    }

    async fn update_ticket(&self, _: TicketId, _: &TicketPatch) -> Result<Ticket, ApiError> {
        unimplemented!()
    }

    async fn delete_ticket(&self, _: TicketId, _: Option<&ClientToken>) -> Result<(), ApiError> {
        unimplemented!()
    }

    async fn list_attachments(
        &self,
        _: TicketId,
        _: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        unimplemented!()
    }

    async fn upload_attachments(
        &self,
        _: TicketId,
        _: Vec<AttachmentUpload>,
        _: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        unimplemented!()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(Vec::new())
    }

    async fn seed_demo(&self) -> Result<String, ApiError> {
        unimplemented!()
    }

    async fn health(&self) -> Result<String, ApiError> {
        Ok("ok".into())
    }
}

struct Fixture {
    inbox: Arc<FakeInbox>,
    tickets: Arc<FakeTickets>,
    board: Arc<TicketBoard>,
    coordinator: Arc<RefreshCoordinator>,
}

fn fixture(inbox: FakeInbox, tickets: FakeTickets) -> Fixture {
    let inbox = Arc::new(inbox);
    let tickets = Arc::new(tickets);
    let board = Arc::new(TicketBoard::new());
    let coordinator = Arc::new(RefreshCoordinator::new(
        tickets.clone(),
        inbox.clone(),
        board.clone(),
        TicketFilter::default(),
        100,
    ));
    Fixture {
        inbox,
        tickets,
        board,
        coordinator,
    }
}

fn poller(coordinator: &Arc<RefreshCoordinator>) -> InboxPoller {
    InboxPoller::new(
        coordinator.clone(),
        Duration::from_secs(5),
        Duration::from_secs(15),
    )
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[tokio::test(start_paused = true)]
async fn cycles_fire_after_initial_delay_then_every_interval_until_stopped() {
    let fx = fixture(FakeInbox::ok(), FakeTickets::default());
    let (_admin_tx, admin_rx) = watch::channel(true);
    let handle = poller(&fx.coordinator).start(admin_rx);

    sleep(secs(4.9)).await;
    assert_eq!(fx.inbox.calls(), 0);

    sleep(secs(0.2)).await;
    assert_eq!(fx.inbox.calls(), 1);
    assert_eq!(fx.tickets.calls(), 1);

    sleep(secs(15.0)).await;
    assert_eq!(fx.inbox.calls(), 2);
    assert_eq!(fx.tickets.calls(), 2);

    handle.stop();
    assert!(handle.is_stopped());
    sleep(secs(100.0)).await;
    assert_eq!(fx.inbox.calls(), 2);
    assert_eq!(fx.tickets.calls(), 2);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn slow_sync_does_not_start_a_second_cycle() {
    let fx = fixture(
        FakeInbox::ok().slow(Duration::from_secs(40)),
        FakeTickets::default(),
    );
    let (_admin_tx, admin_rx) = watch::channel(true);
    let _handle = poller(&fx.coordinator).start(admin_rx);

    // First cycle starts at 5 s and is still syncing at 20 s and 35 s.
    sleep(secs(35.1)).await;
    assert_eq!(fx.inbox.calls(), 1);
    assert_eq!(fx.tickets.calls(), 0);
    assert_eq!(fx.coordinator.poll_phase(), PollPhase::Running);

    // Sync finishes at 45 s, refetch follows immediately.
    sleep(secs(10.0)).await;
    assert_eq!(fx.tickets.calls(), 1);
    assert_eq!(fx.coordinator.poll_phase(), PollPhase::Idle);

    // Next firing at 50 s starts a fresh cycle.
    sleep(secs(5.0)).await;
    assert_eq!(fx.inbox.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn overlapping_cycle_call_returns_skipped() {
    let fx = fixture(
        FakeInbox::ok().slow(Duration::from_secs(10)),
        FakeTickets::default(),
    );

    let coordinator = fx.coordinator.clone();
    let first = tokio::spawn(async move { coordinator.poll_cycle().await });
    tokio::task::yield_now().await;

    assert_eq!(fx.coordinator.poll_cycle().await, CycleOutcome::Skipped);
    assert_eq!(fx.inbox.calls(), 1);

    let outcome = first.await.unwrap();
    assert!(matches!(outcome, CycleOutcome::Completed(ref o) if o.refreshed));
}

#[tokio::test(start_paused = true)]
async fn failed_sync_surfaces_error_refetches_once_and_releases_guard() {
    let fx = fixture(
        FakeInbox::with(SyncBehavior::Fail(ApiError::from_response(
            500,
            r#"{"detail":"mailbox login failed"}"#,
        ))),
        FakeTickets::default(),
    );

    let outcome = fx.coordinator.poll_cycle().await;

    match outcome {
        CycleOutcome::Completed(outcome) => {
            assert_eq!(outcome.sync, SyncOutcome::Failed("mailbox login failed".into()));
            assert!(outcome.refreshed);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fx.tickets.calls(), 1);
    assert_eq!(fx.coordinator.poll_phase(), PollPhase::Idle);
    assert_eq!(
        fx.board.snapshot().error.as_deref(),
        Some("mailbox login failed")
    );

    // The guard was released: the next cycle runs.
    assert!(matches!(
        fx.coordinator.poll_cycle().await,
        CycleOutcome::Completed(_)
    ));
    assert_eq!(fx.inbox.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn unconfigured_mailbox_is_not_shown() {
    let fx = fixture(
        FakeInbox::with(SyncBehavior::Fail(ApiError::from_response(
            400,
            r#"{"detail":"IMAP не настроен"}"#,
        ))),
        FakeTickets::default(),
    );

    let outcome = fx.coordinator.poll_cycle().await;

    assert!(matches!(
        outcome,
        CycleOutcome::Completed(ref o) if o.sync == SyncOutcome::NotConfigured
    ));
    assert_eq!(fx.board.snapshot().error, None);
    assert_eq!(fx.tickets.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn skipped_report_for_missing_mailbox_is_not_shown() {
    let fx = fixture(
        FakeInbox::with(SyncBehavior::Report(SyncReport {
            status: "skipped".into(),
            message: Some("Mail integration not configured".into()),
            ..Default::default()
        })),
        FakeTickets::default(),
    );

    fx.coordinator.poll_cycle().await;
    assert_eq!(fx.board.snapshot().error, None);
}

#[tokio::test(start_paused = true)]
async fn background_refetch_failure_keeps_previous_list() {
    let fx = fixture(FakeInbox::ok(), FakeTickets::default());
    fx.coordinator.reload().await.unwrap();
    assert_eq!(fx.board.snapshot().tickets.len(), 1);

    fx.tickets.fail.store(true, Ordering::SeqCst);
    let outcome = fx.coordinator.poll_cycle().await;

    assert!(matches!(outcome, CycleOutcome::Completed(ref o) if !o.refreshed));
    let snapshot = fx.board.snapshot();
    assert_eq!(snapshot.tickets.len(), 1);
    assert_eq!(snapshot.error, None);
}

#[tokio::test(start_paused = true)]
async fn revoking_admin_cancels_timers() {
    let fx = fixture(FakeInbox::ok(), FakeTickets::default());
    let (admin_tx, admin_rx) = watch::channel(true);
    let handle = poller(&fx.coordinator).start(admin_rx);

    sleep(secs(6.0)).await;
    assert_eq!(fx.inbox.calls(), 1);

    admin_tx.send_replace(false);
    sleep(secs(100.0)).await;
    assert_eq!(fx.inbox.calls(), 1);
    assert!(handle.is_stopped());
}

#[tokio::test(start_paused = true)]
async fn poller_never_fires_without_admin() {
    let fx = fixture(FakeInbox::ok(), FakeTickets::default());
    let (_admin_tx, admin_rx) = watch::channel(false);
    let _handle = poller(&fx.coordinator).start(admin_rx);

    sleep(secs(60.0)).await;
    assert_eq!(fx.inbox.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn each_firing_reads_the_live_filters() {
    let fx = fixture(FakeInbox::ok(), FakeTickets::default());
    let (_admin_tx, admin_rx) = watch::channel(true);
    let _handle = poller(&fx.coordinator).start(admin_rx);

    sleep(secs(5.1)).await;
    assert_eq!(fx.tickets.last_query().filter, TicketFilter::default());

    let filter = TicketFilter::default().with_search("printer").with_status("new");
    fx.coordinator.apply_filter(filter.clone()).await.unwrap();

    sleep(secs(15.0)).await;
    let query = fx.tickets.last_query();
    assert_eq!(query.filter, filter);
    assert_eq!(query.limit, Some(100));
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_dropped() {
    let tickets = FakeTickets::default();
    // Call 1 is slow, call 2 answers at once.
    tickets
        .delays
        .lock()
        .unwrap()
        .extend([Duration::from_secs(10), Duration::ZERO]);
    let fx = fixture(FakeInbox::ok(), tickets);

    let coordinator = fx.coordinator.clone();
    let slow = tokio::spawn(async move { coordinator.reload().await });
    tokio::task::yield_now().await;

    assert!(fx.coordinator.reload().await.unwrap());
    assert!(!slow.await.unwrap().unwrap());

    let snapshot = fx.board.snapshot();
    assert_eq!(snapshot.tickets[0].id, TicketId::new(2));
    assert_eq!(snapshot.revision, 2);
}

#[tokio::test(start_paused = true)]
async fn manual_refresh_reports_imported_tickets() {
    let fx = fixture(
        FakeInbox::with(SyncBehavior::Report(SyncReport {
            status: "ok".into(),
            processed: 4,
            inserted: 3,
            ..Default::default()
        })),
        FakeTickets::default(),
    );

    let outcome = fx.coordinator.manual_refresh().await;

    assert_eq!(outcome.sync.inserted(), 3);
    assert!(outcome.refreshed);
    let snapshot = fx.board.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.notice.unwrap().contains('3'));
    // Manual refresh leaves the poll state alone.
    assert_eq!(fx.coordinator.poll_phase(), PollPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn manual_refresh_sync_failure_is_not_a_banner() {
    let fx = fixture(
        FakeInbox::with(SyncBehavior::Fail(ApiError::Transport("refused".into()))),
        FakeTickets::default(),
    );

    let outcome = fx.coordinator.manual_refresh().await;

    assert_eq!(outcome.sync, SyncOutcome::Failed("refused".into()));
    assert!(outcome.refreshed);
    assert_eq!(fx.board.snapshot().error, None);
}

#[tokio::test(start_paused = true)]
async fn visible_reload_failure_shows_empty_state() {
    let fx = fixture(
        FakeInbox::ok(),
        FakeTickets::failing(),
    );

    let err = fx.coordinator.reload().await.unwrap_err();

    let snapshot = fx.board.snapshot();
    assert!(snapshot.tickets.is_empty());
    assert_eq!(snapshot.error, Some(err.user_message()));
    assert!(!snapshot.loading);
}

#[tokio::test(start_paused = true)]
async fn unmounted_watch_discards_in_flight_cycle() {
    let inbox = Arc::new(FakeInbox::ok().slow(Duration::from_secs(10)));
    let tickets = Arc::new(FakeTickets::default());
    let (_admin_tx, admin_rx) = watch::channel(true);
    let config = PollingConfig {
        initial_delay_secs: 5,
        interval_secs: 15,
        list_limit: 100,
    };

    let view = AdminWatch::mount(
        tickets.clone(),
        inbox.clone(),
        &config,
        TicketFilter::default(),
        admin_rx,
    );
    let board = view.board().clone();
    assert!(view.is_polling());

    // Cycle starts at 5 s; unmount while it is syncing.
    sleep(secs(6.0)).await;
    view.unmount();
    assert!(!board.is_alive());

    sleep(secs(100.0)).await;
    assert_eq!(inbox.calls(), 1);
    // The in-flight cycle finished its refetch but the result was dropped.
    assert_eq!(tickets.calls(), 1);
    assert_eq!(board.snapshot().revision, 0);
    assert!(board.snapshot().tickets.is_empty());
}
