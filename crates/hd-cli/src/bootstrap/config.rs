//! # Configuration Loader
//!
//! Reads the TOML file and maps it onto [`AppConfig`]. Pure data loading:
//! no validation, no business rules. Missing keys keep their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hd_core::app_dirs::AppDirs;
use hd_core::config::AppConfig;
use hd_core::ports::AppDirsPort;
use hd_infra::DirsAppDirsAdapter;

/// Load configuration from a TOML file.
///
/// A file that does not exist yields [`AppConfig::default`]; a file that
/// exists but cannot be read or parsed is an error.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Profile directory: `--profile-dir` first, then `[profile] dir`, then the
/// platform default (`<data-local>/helpdesk[-$HD_PROFILE]`).
pub fn resolve_app_dirs(
    cli_override: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<AppDirs> {
    let adapter = match cli_override {
        Some(dir) => DirsAppDirsAdapter::with_app_data_root(dir),
        None if !config.profile_dir.as_os_str().is_empty() => {
            DirsAppDirsAdapter::with_app_data_root(config.profile_dir.clone())
        }
        None => DirsAppDirsAdapter::new(),
    };
    adapter
        .get_app_dirs()
        .context("Failed to resolve profile directory")
}
