//! Adapters behind the `hd-core` ports: HTTP API client, profile storage,
//! export files, directories and system sources.

pub mod app_dirs;
pub mod fs;
pub mod http;
pub mod storage;
pub mod time;

pub use app_dirs::DirsAppDirsAdapter;
pub use fs::FsExportWriter;
pub use http::HttpApiClient;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::{RandomUuidSource, SystemClock};
