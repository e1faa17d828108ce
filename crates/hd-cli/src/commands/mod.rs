//! Command handlers.
//!
//! Each handler calls exactly one use case (or the admin watch) and renders
//! its result. Errors are returned as `anyhow::Error` with context for the
//! top-level reporter in `main`.

mod admin;
mod client;
mod reports;
mod watch;

use hd_app::UseCases;
use hd_core::config::AppConfig;

use crate::cli::{AdminCommands, AiCommands, Commands};

/// Everything a command handler needs.
pub struct CommandContext {
    pub use_cases: UseCases,
    pub config: AppConfig,
    pub json: bool,
}

pub async fn dispatch(ctx: &CommandContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Token => client::token(ctx),
        Commands::Submit(args) => client::submit(ctx, args).await,
        Commands::Mine(filter) => client::mine(ctx, filter.into_filter()).await,
        Commands::Show { id, admin } => client::show(ctx, id, admin).await,

        Commands::Login { code } => admin::login(ctx, &code).await,
        Commands::Logout => admin::logout(ctx).await,
        Commands::Admin {
            action: AdminCommands::Status,
        } => admin::status(ctx).await,
        Commands::List {
            filter,
            limit,
            offset,
        } => admin::list(ctx, filter.into_filter(), limit, offset).await,
        Commands::Update(args) => admin::update(ctx, args).await,
        Commands::Delete { id } => admin::delete(ctx, id).await,
        Commands::Attach { id, files } => admin::attach(ctx, id, files).await,
        Commands::Sync => admin::sync(ctx).await,
        Commands::SeedDemo => admin::seed_demo(ctx).await,
        Commands::Health => admin::health(ctx).await,

        Commands::Watch(filter) => watch::run(ctx, filter.into_filter()).await,

        Commands::Export { format, filter } => {
            reports::export(ctx, format, filter.into_filter()).await
        }
        Commands::Analytics { days } => reports::analytics(ctx, days).await,
        Commands::Ai { action } => match action {
            AiCommands::Analyze { id } => reports::analyze(ctx, id).await,
            AiCommands::Suggest { id } => reports::suggest(ctx, id).await,
            AiCommands::Auto { id } => reports::auto_analyze(ctx, id).await,
            AiCommands::Send { id, text } => reports::send_reply(ctx, id, &text).await,
        },
    }
}
