use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("storage data corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory unavailable")]
    DataLocalDirUnavailable,
}

#[derive(Debug, Error)]
pub enum ExportWriteError {
    #[error("failed to write export to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}
