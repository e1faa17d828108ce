/// Source of random UUIDs for new client tokens.
///
/// Returns `None` when no cryptographically sourced generator is available,
/// in which case callers fall back to a timestamp + random suffix token.
pub trait UuidSourcePort: Send + Sync {
    fn random_uuid(&self) -> Option<String>;
}
