//! # Dependency Injection
//!
//! Creates the infra adapters and groups them into [`AppDeps`]. The only
//! place that depends on `hd-infra` and `hd-app` at the same time; it
//! assembles, it does not decide.

use std::path::PathBuf;
use std::sync::Arc;

use hd_app::AppDeps;
use hd_core::app_dirs::AppDirs;
use hd_core::config::AppConfig;
use hd_core::ports::KeyValueStorePort;
use hd_infra::{FileKeyValueStore, FsExportWriter, HttpApiClient, RandomUuidSource, SystemClock};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Profile directory initialization failed: {0}")]
    ProfileInit(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Export directory: `[export] output_dir`, or the working directory when unset.
fn export_dir(config: &AppConfig) -> PathBuf {
    if config.export.output_dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        config.export.output_dir.clone()
    }
}

/// Wire all dependencies together.
///
/// One `FileKeyValueStore` backs both the client token and the admin
/// cookie, and one `HttpApiClient` implements every remote port, so all
/// use cases share the same identity and session.
///
/// # Errors
///
/// Returns `WiringError` if the profile directory cannot be created or the
/// HTTP client cannot be built.
pub fn wire_dependencies(config: &AppConfig, dirs: &AppDirs) -> WiringResult<AppDeps> {
    std::fs::create_dir_all(&dirs.app_data_root).map_err(|e| {
        WiringError::ProfileInit(format!(
            "Failed to create {}: {e}",
            dirs.app_data_root.display()
        ))
    })?;

    let storage: Arc<dyn KeyValueStorePort> = Arc::new(FileKeyValueStore::new(dirs.storage_path()));

    let api = Arc::new(
        HttpApiClient::new(&config.server, Some(storage.clone()))
            .map_err(|e| WiringError::HttpClientInit(e.to_string()))?,
    );
    tracing::debug!(base_url = api.base_url(), profile = %dirs.app_data_root.display(), "dependencies wired");

    Ok(AppDeps {
        tickets: api.clone(),
        inbox: api.clone(),
        admin_session: api.clone(),
        analytics: api.clone(),
        assistant: api.clone(),
        exporter: api,

        storage: Some(storage),
        export_writer: Arc::new(FsExportWriter::new(export_dir(config))),

        clock: Arc::new(SystemClock),
        uuid_source: Arc::new(RandomUuidSource),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::ProfileInit("permission denied".to_string());
        assert!(err.to_string().contains("Profile directory initialization"));
        assert!(err.to_string().contains("permission denied"));

        let err = WiringError::HttpClientInit("tls backend".to_string());
        assert!(err.to_string().contains("HTTP client initialization"));
    }

    #[test]
    fn test_wire_dependencies_creates_profile_dir() {
        let temp = tempfile::tempdir().unwrap();
        let dirs = AppDirs {
            app_data_root: temp.path().join("profile"),
        };

        let deps = wire_dependencies(&AppConfig::default(), &dirs).unwrap();

        assert!(dirs.app_data_root.is_dir());
        assert!(deps.storage.is_some());
    }

    #[test]
    fn test_export_dir_defaults_to_working_directory() {
        let mut config = AppConfig::default();
        assert_eq!(export_dir(&config), PathBuf::from("."));

        config.export.output_dir = PathBuf::from("/srv/exports");
        assert_eq!(export_dir(&config), PathBuf::from("/srv/exports"));
    }
}
