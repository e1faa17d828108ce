use std::collections::HashMap;
use std::sync::RwLock;

use hd_core::ports::{KeyValueStoreError, KeyValueStorePort};

/// Process-local store. Values are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> KeyValueStoreError {
    KeyValueStoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl KeyValueStorePort for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.values.read().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.values
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        match values.get(key).filter(|v| !v.trim().is_empty()) {
            Some(existing) => Ok(existing.clone()),
            None => {
                values.insert(key.to_string(), value.to_string());
                Ok(value.to_string())
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.values.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn get_or_insert_returns_existing_value() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get_or_insert("k", "a").unwrap(), "a");
        assert_eq!(store.get_or_insert("k", "b").unwrap(), "a");
    }
}
