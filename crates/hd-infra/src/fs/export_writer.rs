use std::path::PathBuf;

use async_trait::async_trait;
use hd_core::ports::{ExportWriteError, ExportWriterPort};

/// Writes export files into one directory, replacing same-day files.
pub struct FsExportWriter {
    dir: PathBuf,
}

impl FsExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportWriterPort for FsExportWriter {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportWriteError> {
        let path = self.dir.join(file_name);
        let fail = |e: std::io::Error| ExportWriteError::Write {
            path: path.clone(),
            reason: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(fail)?;
        tokio::fs::write(&path, bytes).await.map_err(fail)?;
        Ok(path)
    }
}
