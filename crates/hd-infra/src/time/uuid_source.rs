use hd_core::ports::UuidSourcePort;

/// Random v4 UUIDs from the OS generator.
pub struct RandomUuidSource;

impl UuidSourcePort for RandomUuidSource {
    fn random_uuid(&self) -> Option<String> {
        Some(uuid::Uuid::new_v4().to_string())
    }
}
