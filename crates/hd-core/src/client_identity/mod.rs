//! Anonymous client identity.
//!
//! A [`ClientToken`] is an opaque scoping key that lets an unauthenticated
//! user see "their" tickets without an account. It is not authentication:
//! the backend only compares it with the token stored on each ticket.
//!
//! ## Invariants
//!
//! - One profile = one token. Every caller resolves the token through the
//!   same storage keys, otherwise tickets created in one place become
//!   invisible in another.
//! - A token is never mutated once persisted. The only rewrite is the
//!   one-time copy from [`LEGACY_CLIENT_TOKEN_KEY`] to [`CLIENT_TOKEN_KEY`].
//! - The empty token means "no identity yet" and must never reach the server.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Storage key holding the current client token.
pub const CLIENT_TOKEN_KEY: &str = "client_token";

/// Storage key written by older releases. Read once and migrated.
pub const LEGACY_CLIENT_TOKEN_KEY: &str = "support_client_token";

/// Prefix of tokens generated without a UUID source.
pub const FALLBACK_TOKEN_PREFIX: &str = "ct";

const FALLBACK_SUFFIX_LEN: usize = 10;
const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The "no identity" token returned when no persistent storage exists.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Builds a token of the form `ct-<unix millis>-<base36 suffix>`.
    pub fn fallback<R: Rng + ?Sized>(now_ms: i64, rng: &mut R) -> Self {
        let suffix: String = (0..FALLBACK_SUFFIX_LEN)
            .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
            .collect();
        Self(format!("{FALLBACK_TOKEN_PREFIX}-{now_ms}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Value to send as the `client_token` scope, `None` for the empty token.
    pub fn as_scope(&self) -> Option<&str> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trim())
        }
    }
}

impl std::fmt::Display for ClientToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ClientToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ClientToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Found under [`CLIENT_TOKEN_KEY`].
    Stored,
    /// Copied from [`LEGACY_CLIENT_TOKEN_KEY`] during this resolution.
    MigratedFromLegacy,
    /// Generated and persisted during this resolution.
    Generated,
    /// Generated but not persisted because storage failed.
    Ephemeral,
    /// No persistent storage in this context.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClientToken {
    pub token: ClientToken,
    pub origin: TokenOrigin,
}
