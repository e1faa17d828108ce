//! # Configuration DTOs
//!
//! Pure data: TOML → DTO mapping with documented fallbacks for missing keys.
//! Reading the file is the bootstrap layer's job.

mod app_config;

pub use app_config::{AppConfig, ExportConfig, PollingConfig, ServerConfig};
