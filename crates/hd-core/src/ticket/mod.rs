//! Support tickets and the queries that select them.

mod draft;
mod filter;
mod model;

pub use draft::{TicketDraft, TicketIntake, TicketPatch, ValidationError};
pub use filter::{TicketFilter, TicketQuery, TicketView, DEFAULT_LIST_LIMIT};
pub use model::{Sentiment, Ticket, TicketPage};
