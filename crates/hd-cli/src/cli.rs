//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap. Execution lives in [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hd_core::export::ExportFormat;
use hd_core::ids::{CategoryId, TicketId};
use hd_core::ticket::{TicketFilter, TicketView};

/// Helpdesk client
#[derive(Debug, Parser)]
#[command(name = "helpdesk")]
#[command(about = "Client for the helpdesk ticket service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to `<profile>/config.toml`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile directory holding storage, config and logs
    #[arg(long, global = true)]
    pub profile_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the anonymous client token of this profile
    Token,

    /// Submit a new ticket
    Submit(SubmitArgs),

    /// List tickets submitted from this profile
    Mine(FilterArgs),

    /// Show one ticket with its attachments
    Show {
        id: TicketId,
        /// Read as admin instead of scoping to the client token
        #[arg(long)]
        admin: bool,
    },

    /// Start an admin session
    Login { code: String },

    /// End the admin session
    Logout,

    /// Admin session commands
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },

    /// List all tickets (admin)
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = hd_core::ticket::DEFAULT_LIST_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Update a ticket (admin)
    Update(UpdateArgs),

    /// Delete a ticket (admin)
    Delete { id: TicketId },

    /// Upload files to a ticket (admin)
    Attach {
        id: TicketId,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Import new mail from the inbox once
    Sync,

    /// Follow the admin ticket list, syncing the inbox in the background
    Watch(FilterArgs),

    /// Download tickets as CSV or XLSX
    Export {
        format: ExportFormat,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the analytics dashboard
    Analytics {
        /// Timeline window in days
        #[arg(long)]
        days: Option<u32>,
    },

    /// AI assistance for a ticket
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },

    /// Fill the backend with demo tickets
    SeedDemo,

    /// Check that the backend is reachable
    Health,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Report whether this profile holds an admin session
    Status,
}

#[derive(Debug, Subcommand)]
pub enum AiCommands {
    /// Classify the ticket
    Analyze { id: TicketId },
    /// Draft a reply
    Suggest { id: TicketId },
    /// Run the full analysis and store its results on the ticket
    Auto { id: TicketId },
    /// Send a reply to the ticket author
    Send { id: TicketId, text: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub category: Option<CategoryId>,
    #[arg(long)]
    pub request_category: Option<String>,
    /// `open` or `answered`
    #[arg(long)]
    pub view: Option<TicketView>,
}

impl FilterArgs {
    pub fn into_filter(self) -> TicketFilter {
        TicketFilter {
            search: self.search,
            status: self.status,
            category_id: self.category,
            request_category: self.request_category,
            view: self.view,
        }
    }
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub body: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub category: Option<CategoryId>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
    #[arg(long)]
    pub device: Option<String>,
    /// Files to attach after the ticket is created
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: TicketId,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub category: Option<CategoryId>,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "helpdesk",
            "mine",
            "--status",
            "new",
            "--profile-dir",
            "/tmp/p",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.profile_dir, Some(PathBuf::from("/tmp/p")));
        match cli.command {
            Commands::Mine(filter) => assert_eq!(filter.status.as_deref(), Some("new")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_export_format_and_view() {
        let cli = Cli::try_parse_from(["helpdesk", "export", "xlsx", "--view", "answered"]).unwrap();
        match cli.command {
            Commands::Export { format, filter } => {
                assert_eq!(format, ExportFormat::Xlsx);
                assert_eq!(filter.into_filter().view, Some(TicketView::Answered));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_export_format() {
        assert!(Cli::try_parse_from(["helpdesk", "export", "pdf"]).is_err());
    }

    #[test]
    fn attach_requires_files() {
        assert!(Cli::try_parse_from(["helpdesk", "attach", "3"]).is_err());
        assert!(Cli::try_parse_from(["helpdesk", "attach", "3", "a.png"]).is_ok());
    }

    #[test]
    fn list_defaults_to_standard_page_size() {
        let cli = Cli::try_parse_from(["helpdesk", "list"]).unwrap();
        match cli.command {
            Commands::List { limit, offset, .. } => {
                assert_eq!(limit, 100);
                assert_eq!(offset, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
