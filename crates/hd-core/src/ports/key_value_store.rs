use crate::ports::errors::KeyValueStoreError;

/// Persistent string key-value storage scoped to one client profile.
///
/// Implementations must make `set` idempotent (overwrite if the key exists).
pub trait KeyValueStorePort: Send + Sync {
    /// Load the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Store `value` under `key` unless a non-blank value is already there,
    /// and return whichever value the key holds afterwards.
    ///
    /// The check and the write are one atomic step: when several callers
    /// race, the first writer wins and every caller gets its value back.
    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

#[cfg(feature = "test-util")]
mockall::mock! {
    pub KeyValueStore {}

    impl KeyValueStorePort for KeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;
        fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
        fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError>;
        fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
    }
}
