//! Client token behaviour across process restarts, against the real
//! file-backed profile storage.

use std::sync::{Arc, Barrier};

use hd_app::usecases::client_identity::ResolveClientToken;
use hd_core::client_identity::TokenOrigin;
use hd_core::ports::{KeyValueStoreError, KeyValueStorePort};
use hd_core::{CLIENT_TOKEN_KEY, LEGACY_CLIENT_TOKEN_KEY};
use hd_infra::{FileKeyValueStore, RandomUuidSource, SystemClock};

fn resolver(store: Arc<FileKeyValueStore>) -> ResolveClientToken {
    ResolveClientToken::new(
        Some(store as Arc<dyn KeyValueStorePort>),
        Arc::new(RandomUuidSource),
        Arc::new(SystemClock),
    )
}

#[test]
fn token_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let first = resolver(Arc::new(FileKeyValueStore::new(&path))).resolve();
    assert_eq!(first.origin, TokenOrigin::Generated);
    assert!(!first.token.is_empty());

    // A new store instance reads the same file, like a second run would.
    let store = Arc::new(FileKeyValueStore::new(&path));
    let second = resolver(store.clone()).resolve();
    assert_eq!(second.origin, TokenOrigin::Stored);
    assert_eq!(second.token, first.token);

    assert_eq!(
        store.get(CLIENT_TOKEN_KEY).unwrap().as_deref(),
        Some(first.token.as_str())
    );
}

#[test]
fn legacy_token_is_migrated_and_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"support_client_token":"legacy-42"}"#).unwrap();

    let store = Arc::new(FileKeyValueStore::new(&path));
    let resolved = resolver(store.clone()).resolve();

    assert_eq!(resolved.origin, TokenOrigin::MigratedFromLegacy);
    assert_eq!(resolved.token.as_str(), "legacy-42");
    assert_eq!(store.get(CLIENT_TOKEN_KEY).unwrap().as_deref(), Some("legacy-42"));
    assert_eq!(
        store.get(LEGACY_CLIENT_TOKEN_KEY).unwrap().as_deref(),
        Some("legacy-42")
    );

    let again = resolver(Arc::new(FileKeyValueStore::new(&path))).resolve();
    assert_eq!(again.origin, TokenOrigin::Stored);
}

#[test]
fn corrupt_storage_yields_ephemeral_token_and_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let resolved = resolver(Arc::new(FileKeyValueStore::new(&path))).resolve();

    assert_eq!(resolved.origin, TokenOrigin::Ephemeral);
    assert!(!resolved.token.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
}

/// File store that parks readers of a missing token until every process
/// has looked, so all of them go on to create one.
struct InterleavedStore {
    inner: FileKeyValueStore,
    rendezvous: Arc<Barrier>,
}

impl KeyValueStorePort for InterleavedStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let value = self.inner.get(key)?;
        if key == CLIENT_TOKEN_KEY && value.is_none() {
            self.rendezvous.wait();
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.inner.set(key, value)
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError> {
        self.inner.get_or_insert(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.inner.remove(key)
    }
}

#[test]
fn concurrent_first_runs_share_one_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let rendezvous = Arc::new(Barrier::new(3));

    // Separate store instances stand in for separate processes.
    let runs: Vec<_> = (0..3)
        .map(|_| {
            let store = InterleavedStore {
                inner: FileKeyValueStore::new(&path),
                rendezvous: rendezvous.clone(),
            };
            std::thread::spawn(move || {
                ResolveClientToken::new(
                    Some(Arc::new(store) as Arc<dyn KeyValueStorePort>),
                    Arc::new(RandomUuidSource),
                    Arc::new(SystemClock),
                )
                .resolve()
            })
        })
        .collect();
    let results: Vec<_> = runs.into_iter().map(|r| r.join().unwrap()).collect();

    let stored = FileKeyValueStore::new(&path)
        .get(CLIENT_TOKEN_KEY)
        .unwrap()
        .unwrap();
    for resolved in &results {
        assert_eq!(resolved.token.as_str(), stored);
    }
    let generated = results
        .iter()
        .filter(|r| r.origin == TokenOrigin::Generated)
        .count();
    assert_eq!(generated, 1);
}
