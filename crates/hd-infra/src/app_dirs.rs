use std::path::PathBuf;

use hd_core::app_dirs::AppDirs;
use hd_core::ports::{AppDirsError, AppDirsPort};

const APP_DIR_NAME: &str = "helpdesk";

/// Environment variable selecting a named profile (`helpdesk-<profile>`).
pub const PROFILE_ENV: &str = "HD_PROFILE";

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.trim().is_empty() => {
            format!("{APP_DIR_NAME}-{}", profile.trim())
        }
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves the profile directory under the system data-local directory.
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
    app_data_root_override: Option<PathBuf>,
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
            app_data_root_override: None,
        }
    }

    /// Uses `root` as the profile directory as-is (`--profile-dir`).
    pub fn with_app_data_root(root: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: None,
            app_data_root_override: Some(root),
        }
    }

    #[cfg(test)]
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
            app_data_root_override: None,
        }
    }

    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        if let Some(root) = &self.app_data_root_override {
            return Ok(AppDirs {
                app_data_root: root.clone(),
            });
        }

        let base = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;
        Ok(AppDirs {
            app_data_root: base.join(resolved_app_dir_name()),
        })
    }
}
