//! reqwest adapter for the helpdesk REST API.
//!
//! One [`HttpApiClient`] implements every remote port. Port impls are split
//! by concern; request plumbing and error mapping live in `client`.

mod analytics;
mod assistant;
mod client;
mod export;
mod session;
mod tickets;

pub use client::{HttpApiClient, ADMIN_COOKIE_KEY};
