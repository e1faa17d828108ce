//! JSON-file key-value store backing one client profile.
//!
//! The whole map lives in a single JSON object. Writes go to a temp file
//! that is renamed over the original, falling back to a direct write when
//! the rename fails (e.g. cross-device link). Mutations hold an exclusive
//! lock on a sidecar `.lock` file so several processes sharing one profile
//! do not interleave their read-modify-write cycles.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hd_core::ports::{KeyValueStoreError, KeyValueStorePort};
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, KeyValueStoreError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            KeyValueStoreError::Io(format!("read {} failed: {e}", self.path.display()))
        })?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            KeyValueStoreError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), KeyValueStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KeyValueStoreError::Io(format!("create {} failed: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| KeyValueStoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| {
            KeyValueStoreError::Io(format!("write {} failed: {e}", tmp.display()))
        })?;

        if let Err(rename_err) = std::fs::rename(&tmp, &self.path) {
            warn!(error = %rename_err, path = %self.path.display(), "atomic rename failed, writing directly");
            std::fs::write(&self.path, &json).map_err(|e| {
                KeyValueStoreError::Io(format!("write {} failed: {e}", self.path.display()))
            })?;
            let _ = std::fs::remove_file(&tmp);
        }
        Ok(())
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Exclusive cross-process lock, released when the returned file is dropped.
    fn lock_file(&self) -> Result<File, KeyValueStoreError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KeyValueStoreError::Io(format!("create {} failed: {e}", parent.display()))
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                KeyValueStoreError::Io(format!("open {} failed: {e}", lock_path.display()))
            })?;
        file.lock().map_err(|e| {
            KeyValueStoreError::Unavailable(format!("lock {} failed: {e}", lock_path.display()))
        })?;
        Ok(file)
    }

    fn locked<T>(
        &self,
        f: impl FnOnce() -> Result<T, KeyValueStoreError>,
    ) -> Result<T, KeyValueStoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| KeyValueStoreError::Unavailable("storage lock poisoned".into()))?;
        f()
    }

    fn locked_for_write<T>(
        &self,
        f: impl FnOnce() -> Result<T, KeyValueStoreError>,
    ) -> Result<T, KeyValueStoreError> {
        self.locked(|| {
            let _file_lock = self.lock_file()?;
            f()
        })
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        self.locked(|| Ok(self.load()?.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.locked_for_write(|| {
            let mut entries = self.load()?;
            if entries.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }
            entries.insert(key.to_string(), value.to_string());
            self.save(&entries)?;
            debug!(key, "stored value");
            Ok(())
        })
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError> {
        self.locked_for_write(|| {
            // Re-read under the lock; another process may have won already.
            let mut entries = self.load()?;
            if let Some(existing) = entries.get(key).filter(|v| !v.trim().is_empty()) {
                return Ok(existing.clone());
            }
            entries.insert(key.to_string(), value.to_string());
            self.save(&entries)?;
            debug!(key, "stored value");
            Ok(value.to_string())
        })
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.locked_for_write(|| {
            let mut entries = self.load()?;
            if entries.remove(key).is_some() {
                self.save(&entries)?;
            }
            Ok(())
        })
    }
}
