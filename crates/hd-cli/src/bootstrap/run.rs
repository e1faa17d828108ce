//! Startup sequence: resolve the profile, load config, start tracing,
//! wire dependencies, run one command.

use anyhow::Context;
use hd_app::UseCases;
use hd_core::config::AppConfig;

use super::{load_config, resolve_app_dirs, tracing::init_tracing_subscriber, wire_dependencies};
use crate::cli::Cli;
use crate::commands::{dispatch, CommandContext};

pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    // The default config lives in the profile, so the profile is resolved
    // once without config to find it, and again once `[profile] dir` is known.
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => resolve_app_dirs(cli.profile_dir.clone(), &AppConfig::default())?.config_path(),
    };
    let config = load_config(&config_path)?;
    let dirs = resolve_app_dirs(cli.profile_dir.clone(), &config)?;

    init_tracing_subscriber(&dirs.logs_dir()).context("Failed to initialize tracing")?;
    tracing::debug!(config = %config_path.display(), profile = %dirs.app_data_root.display(), "starting");

    let deps = wire_dependencies(&config, &dirs)?;
    let ctx = CommandContext {
        use_cases: UseCases::new(deps),
        config,
        json: cli.json,
    };

    dispatch(&ctx, cli.command).await
}
