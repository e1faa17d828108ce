//! `helpdesk watch`: the admin ticket view on a terminal.
//!
//! Mounts an [`AdminWatch`](hd_app::AdminWatch), runs one manual refresh and
//! then prints the board whenever it changes. The background poller keeps
//! syncing the inbox until Ctrl-C or until the admin session is gone.

use std::time::Duration;

use hd_app::{BoardSnapshot, SyncOutcome};
use hd_core::ticket::TicketFilter;
use serde_json::json;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use super::CommandContext;
use crate::output;

/// Lower bound for re-checking the admin session.
const MIN_SESSION_RECHECK: Duration = Duration::from_secs(5);

pub async fn run(ctx: &CommandContext, filter: TicketFilter) -> anyhow::Result<()> {
    let session = ctx.use_cases.admin_session();
    if !session.check().await {
        anyhow::bail!("Admin session required; run `helpdesk login <code>` first");
    }

    let view = ctx.use_cases.admin_watch(&ctx.config.polling, filter);
    let mut board = view.board().subscribe();
    let mut admin = session.subscribe();

    let first = view.coordinator().manual_refresh().await;
    if let SyncOutcome::Failed(reason) = &first.sync {
        warn!(%reason, "initial inbox sync failed");
    }

    let recheck_every = ctx.config.polling.interval().max(MIN_SESSION_RECHECK);
    let mut recheck = interval_at(Instant::now() + recheck_every, recheck_every);
    recheck.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Last rendered state without its notice, to skip repaints that only
    // dismiss a notice.
    let mut last_shown: Option<BoardSnapshot> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("watch interrupted");
                break;
            }
            changed = board.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = board.borrow_and_update().clone();
                if snapshot.loading {
                    continue;
                }
                let shown = BoardSnapshot { notice: None, ..snapshot.clone() };
                if last_shown.as_ref() != Some(&shown) || snapshot.notice.is_some() {
                    render(ctx, &snapshot)?;
                    last_shown = Some(shown);
                }
                if snapshot.notice.is_some() {
                    view.board().dismiss_notice();
                }
            }
            _ = recheck.tick() => {
                // A 401 flips the shared admin flag, which the branch below observes.
                session.check().await;
            }
            _ = admin.wait_for(|is_admin| !*is_admin) => {
                eprintln!("Admin session ended.");
                break;
            }
        }
    }

    view.unmount();
    Ok(())
}

fn render(ctx: &CommandContext, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
    if ctx.json {
        return output::print_json(&json!({
            "revision": snapshot.revision,
            "total": snapshot.total,
            "error": snapshot.error,
            "notice": snapshot.notice,
            "tickets": snapshot.tickets,
        }));
    }
    output::print_board(snapshot);
    Ok(())
}
