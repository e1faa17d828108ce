//! Resolve the anonymous client token of this profile.

use std::sync::Arc;

use hd_core::client_identity::{
    ClientToken, ResolvedClientToken, TokenOrigin, CLIENT_TOKEN_KEY, LEGACY_CLIENT_TOKEN_KEY,
};
use hd_core::ports::{ClockPort, KeyValueStorePort, UuidSourcePort};
use tracing::{debug, info, warn};

/// Get-or-create for the client token.
///
/// Every use case that scopes tickets to an anonymous user must share one
/// instance of this resolver (or at least the same storage), otherwise the
/// identity fractures between them.
pub struct ResolveClientToken {
    store: Option<Arc<dyn KeyValueStorePort>>,
    uuid_source: Arc<dyn UuidSourcePort>,
    clock: Arc<dyn ClockPort>,
}

impl ResolveClientToken {
    pub fn new(
        store: Option<Arc<dyn KeyValueStorePort>>,
        uuid_source: Arc<dyn UuidSourcePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            uuid_source,
            clock,
        }
    }

    /// Returns the token, creating and persisting it on first use.
    ///
    /// The empty token is returned when no persistent storage exists; callers
    /// must not send it to the server.
    pub fn execute(&self) -> ClientToken {
        self.resolve().token
    }

    /// Same as [`execute`](Self::execute) but also reports where the token came from.
    ///
    /// Storage failures never propagate. A failed read or write yields a fresh
    /// token that is not persisted ([`TokenOrigin::Ephemeral`]).
    pub fn resolve(&self) -> ResolvedClientToken {
        let Some(store) = self.store.as_ref() else {
            debug!("no persistent storage, client token unavailable");
            return ResolvedClientToken {
                token: ClientToken::empty(),
                origin: TokenOrigin::Unavailable,
            };
        };

        match read_non_empty(store.as_ref(), CLIENT_TOKEN_KEY) {
            Ok(Some(value)) => {
                return ResolvedClientToken {
                    token: ClientToken::new(value),
                    origin: TokenOrigin::Stored,
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "reading client token failed, using ephemeral token");
                return self.ephemeral();
            }
        }

        match read_non_empty(store.as_ref(), LEGACY_CLIENT_TOKEN_KEY) {
            Ok(Some(legacy)) => return migrate(store.as_ref(), legacy),
            Ok(None) => {}
            Err(err) => {
                // Generating now could shadow a legacy token we failed to read.
                warn!(error = %err, "reading legacy client token failed, using ephemeral token");
                return self.ephemeral();
            }
        }

        let token = self.generate();
        match store.get_or_insert(CLIENT_TOKEN_KEY, token.as_str()) {
            Ok(winner) if winner == token.as_str() => {
                info!("created new client token");
                ResolvedClientToken {
                    token,
                    origin: TokenOrigin::Generated,
                }
            }
            Ok(winner) => {
                debug!("client token was created concurrently, using stored value");
                ResolvedClientToken {
                    token: ClientToken::new(winner.trim()),
                    origin: TokenOrigin::Stored,
                }
            }
            Err(err) => {
                warn!(error = %err, "persisting client token failed, token is ephemeral");
                ResolvedClientToken {
                    token,
                    origin: TokenOrigin::Ephemeral,
                }
            }
        }
    }

    fn ephemeral(&self) -> ResolvedClientToken {
        ResolvedClientToken {
            token: self.generate(),
            origin: TokenOrigin::Ephemeral,
        }
    }

    fn generate(&self) -> ClientToken {
        match self.uuid_source.random_uuid().filter(|u| !u.trim().is_empty()) {
            Some(uuid) => ClientToken::new(uuid),
            None => ClientToken::fallback(self.clock.now_ms(), &mut rand::rng()),
        }
    }
}

fn migrate(store: &dyn KeyValueStorePort, legacy: String) -> ResolvedClientToken {
    match store.get_or_insert(CLIENT_TOKEN_KEY, &legacy) {
        Ok(winner) if winner.trim() == legacy => {
            info!("migrated client token from legacy storage key");
            ResolvedClientToken {
                token: ClientToken::new(legacy),
                origin: TokenOrigin::MigratedFromLegacy,
            }
        }
        Ok(winner) => ResolvedClientToken {
            token: ClientToken::new(winner.trim()),
            origin: TokenOrigin::Stored,
        },
        Err(err) => {
            // The legacy key still holds the value, so the next call retries.
            warn!(error = %err, "migrating legacy client token failed");
            ResolvedClientToken {
                token: ClientToken::new(legacy),
                origin: TokenOrigin::MigratedFromLegacy,
            }
        }
    }
}

/// Stored value under `key`, trimmed. Blank values count as absent.
fn read_non_empty(
    store: &dyn KeyValueStorePort,
    key: &str,
) -> Result<Option<String>, hd_core::ports::KeyValueStoreError> {
    Ok(store
        .get(key)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}
