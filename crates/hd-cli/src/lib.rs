//! # hd-cli
//!
//! Command-line adapter for the helpdesk client: bootstrap (config,
//! tracing, wiring) and the `clap` command surface.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod output;

pub use bootstrap::run_app;
pub use cli::Cli;
