use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }

    pub fn config_path(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }

    /// File backing the profile's key-value storage (client token lives here).
    pub fn storage_path(&self) -> PathBuf {
        self.app_data_root.join("storage.json")
    }
}
