mod clock;
mod uuid_source;

pub use clock::SystemClock;
pub use uuid_source::RandomUuidSource;
