use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{CategoryId, TicketId};

/// Ticket as returned by the backend.
///
/// Only the identity and message fields are required; everything the AI
/// pipeline or the mail importer fills in later is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    // AI output
    #[serde(default)]
    pub ai_category: Option<String>,
    #[serde(default)]
    pub ai_reply: Option<String>,
    #[serde(default, deserialize_with = "bool_or_int")]
    pub reply_sent: Option<bool>,
    #[serde(default)]
    pub sent_reply: Option<String>,
    #[serde(default)]
    pub reply_sent_at: Option<String>,

    // Fields extracted from incoming mail
    #[serde(default)]
    pub sender_full_name: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub sender_phone: Option<String>,
    #[serde(default)]
    pub serial_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub issue_summary: Option<String>,
    #[serde(default)]
    pub request_category: Option<String>,
}

impl Ticket {
    pub fn is_answered(&self) -> bool {
        self.reply_sent.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[serde(other)]
    Unknown,
}

/// SQLite-backed deployments report `reply_sent` as 0/1.
fn bool_or_int<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    }))
}

/// One page of tickets.
///
/// The list endpoint answers either a bare array or `{ items, total }`;
/// both shapes decode into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TicketPageWire")]
pub struct TicketPage {
    pub items: Vec<Ticket>,
    pub total: Option<u64>,
}

impl TicketPage {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TicketPageWire {
    Bare(Vec<Ticket>),
    Wrapped {
        items: Vec<Ticket>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl From<TicketPageWire> for TicketPage {
    fn from(wire: TicketPageWire) -> Self {
        match wire {
            TicketPageWire::Bare(items) => Self { items, total: None },
            TicketPageWire::Wrapped { items, total } => Self { items, total },
        }
    }
}
