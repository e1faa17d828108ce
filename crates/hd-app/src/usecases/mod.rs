//! Client use cases.
//!
//! Each use case is a struct holding the ports it needs, with an async
//! entry point wrapped in an `info_span!`. [`UseCases`] builds them from
//! [`AppDeps`] so that every use case scoping tickets to the anonymous
//! client shares one [`ResolveClientToken`].

pub mod admin_session;
pub mod analytics_dashboard;
pub mod assist_ticket;
pub mod client_identity;
pub mod export_tickets;
pub mod health;
pub mod list_my_tickets;
pub mod list_tickets;
pub mod manage_tickets;
pub mod submit_ticket;
pub mod sync_inbox;
pub mod ticket_detail;

use std::sync::Arc;

use hd_core::config::PollingConfig;
use hd_core::ticket::TicketFilter;

pub use admin_session::{AdminSession, AdminSessionError};
pub use analytics_dashboard::LoadAnalytics;
pub use assist_ticket::{AssistError, AssistTicket};
pub use client_identity::ResolveClientToken;
pub use export_tickets::{ExportError, ExportTickets};
pub use health::CheckHealth;
pub use list_my_tickets::ListMyTickets;
pub use list_tickets::ListTickets;
pub use manage_tickets::{ManageTicketError, ManageTickets};
pub use submit_ticket::{SubmitTicket, SubmitTicketError};
pub use sync_inbox::SyncInbox;
pub use ticket_detail::{GetTicketDetail, TicketDetail};

use crate::deps::AppDeps;
use crate::polling::AdminWatch;

/// Who is looking at a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Unscoped access under an admin session.
    Admin,
    /// Anonymous client, scoped by the client token.
    Client,
}

/// Use case accessor built once per process.
pub struct UseCases {
    deps: AppDeps,
    identity: Arc<ResolveClientToken>,
    admin_session: Arc<AdminSession>,
}

impl UseCases {
    pub fn new(deps: AppDeps) -> Self {
        let identity = Arc::new(ResolveClientToken::new(
            deps.storage.clone(),
            deps.uuid_source.clone(),
            deps.clock.clone(),
        ));
        let admin_session = Arc::new(AdminSession::new(deps.admin_session.clone()));
        Self {
            deps,
            identity,
            admin_session,
        }
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn client_identity(&self) -> Arc<ResolveClientToken> {
        self.identity.clone()
    }

    pub fn admin_session(&self) -> Arc<AdminSession> {
        self.admin_session.clone()
    }

    pub fn submit_ticket(&self) -> SubmitTicket {
        SubmitTicket::new(self.deps.tickets.clone(), self.identity.clone())
    }

    pub fn list_my_tickets(&self) -> ListMyTickets {
        ListMyTickets::new(self.deps.tickets.clone(), self.identity.clone())
    }

    pub fn ticket_detail(&self) -> GetTicketDetail {
        GetTicketDetail::new(self.deps.tickets.clone(), self.identity.clone())
    }

    pub fn list_tickets(&self) -> ListTickets {
        ListTickets::new(self.deps.tickets.clone())
    }

    pub fn manage_tickets(&self) -> ManageTickets {
        ManageTickets::new(self.deps.tickets.clone())
    }

    pub fn sync_inbox(&self) -> SyncInbox {
        SyncInbox::new(self.deps.inbox.clone())
    }

    pub fn assist_ticket(&self) -> AssistTicket {
        AssistTicket::new(self.deps.assistant.clone())
    }

    pub fn analytics(&self) -> LoadAnalytics {
        LoadAnalytics::new(self.deps.analytics.clone())
    }

    pub fn export_tickets(&self) -> ExportTickets {
        ExportTickets::new(
            self.deps.exporter.clone(),
            self.deps.export_writer.clone(),
            self.deps.clock.clone(),
        )
    }

    pub fn health(&self) -> CheckHealth {
        CheckHealth::new(self.deps.tickets.clone())
    }

    /// Mounts the admin view and starts polling while the admin session lasts.
    pub fn admin_watch(&self, config: &PollingConfig, filter: TicketFilter) -> AdminWatch {
        AdminWatch::mount(
            self.deps.tickets.clone(),
            self.deps.inbox.clone(),
            config,
            filter,
            self.admin_session.subscribe(),
        )
    }
}
