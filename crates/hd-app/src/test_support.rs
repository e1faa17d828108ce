//! In-crate fakes shared by the use case unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hd_core::attachment::{AttachmentUpload, TicketAttachment};
use hd_core::category::Category;
use hd_core::client_identity::ClientToken;
use hd_core::ids::TicketId;
use hd_core::ports::{ClockPort, KeyValueStoreError, KeyValueStorePort, TicketApiPort, UuidSourcePort};
use hd_core::ticket::{Ticket, TicketDraft, TicketPage, TicketPatch, TicketQuery};
use hd_core::ApiError;

use crate::usecases::client_identity::ResolveClientToken;

pub fn ticket(id: i64, subject: &str) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        sender_email: "client@example.com".into(),
        sender_name: None,
        subject: subject.into(),
        body: "body".into(),
        status: "new".into(),
        priority: "medium".into(),
        category_id: None,
        source: "manual".into(),
        external_id: None,
        received_at: None,
        created_at: None,
        updated_at: None,
        ai_category: None,
        ai_reply: None,
        reply_sent: None,
        sent_reply: None,
        reply_sent_at: None,
        sender_full_name: None,
        object_name: None,
        sender_phone: None,
        serial_numbers: None,
        device_type: None,
        sentiment: None,
        issue_summary: None,
        request_category: None,
    }
}

#[derive(Default)]
pub struct FakeTicketApi {
    pub tickets: Mutex<Vec<Ticket>>,
    pub queries: Mutex<Vec<TicketQuery>>,
    pub drafts: Mutex<Vec<TicketDraft>>,
    pub patches: Mutex<Vec<(TicketId, TicketPatch)>>,
    pub scopes: Mutex<Vec<Option<ClientToken>>>,
    pub deleted: Mutex<Vec<TicketId>>,
    pub attachment_calls: AtomicUsize,
    pub fail_with: Mutex<Option<ApiError>>,
    pub fail_attachments: bool,
}

impl FakeTicketApi {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: Mutex::new(tickets),
            ..Default::default()
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            fail_with: Mutex::new(Some(err)),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, id: TicketId) -> Result<Ticket, ApiError> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(ApiError::Http {
                status: 404,
                message: "Ticket not found".into(),
            })
    }
}

#[async_trait]
impl TicketApiPort for FakeTicketApi {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError> {
        self.queries.lock().unwrap().push(query.clone());
        self.check()?;
        Ok(TicketPage {
            items: self.tickets.lock().unwrap().clone(),
            total: None,
        })
    }

    async fn get_ticket(&self, id: TicketId, scope: Option<&ClientToken>) -> Result<Ticket, ApiError> {
        self.scopes.lock().unwrap().push(scope.cloned());
        self.check()?;
        self.find(id)
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket, ApiError> {
        self.drafts.lock().unwrap().push(draft.clone());
        self.check()?;
        let mut created = ticket(100, &draft.subject);
        created.sender_email = draft.sender_email.clone();
        created.body = draft.body.clone();
        Ok(created)
    }

    async fn update_ticket(&self, id: TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError> {
        self.patches.lock().unwrap().push((id, patch.clone()));
        self.check()?;
        let mut updated = self.find(id)?;
        if let Some(status) = &patch.status {
            updated.status = status.clone();
        }
        Ok(updated)
    }

    async fn delete_ticket(&self, id: TicketId, scope: Option<&ClientToken>) -> Result<(), ApiError> {
        self.scopes.lock().unwrap().push(scope.cloned());
        self.check()?;
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    async fn list_attachments(
        &self,
        _id: TicketId,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        self.attachment_calls.fetch_add(1, Ordering::SeqCst);
        self.scopes.lock().unwrap().push(scope.cloned());
        if self.fail_attachments {
            return Err(ApiError::Http {
                status: 500,
                message: "storage offline".into(),
            });
        }
        Ok(Vec::new())
    }

    async fn upload_attachments(
        &self,
        id: TicketId,
        files: Vec<AttachmentUpload>,
        scope: Option<&ClientToken>,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        self.scopes.lock().unwrap().push(scope.cloned());
        self.check()?;
        Ok(files
            .into_iter()
            .enumerate()
            .map(|(i, f)| TicketAttachment {
                id: hd_core::ids::AttachmentId::new(i as i64 + 1),
                ticket_id: id,
                filename: f.file_name,
                mime_type: Some(f.mime_type),
                size_bytes: Some(f.bytes.len() as u64),
                created_at: None,
            })
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn seed_demo(&self) -> Result<String, ApiError> {
        self.check()?;
        Ok("seeded".into())
    }

    async fn health(&self) -> Result<String, ApiError> {
        self.check()?;
        Ok("ok".into())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl KeyValueStorePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, KeyValueStoreError> {
        Ok(self
            .values
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert_with(|| value.to_string())
            .clone())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct FixedUuid(pub &'static str);

impl UuidSourcePort for FixedUuid {
    fn random_uuid(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

pub struct FixedClock(pub i64);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Resolver over an empty in-memory store that generates `uuid`.
pub fn identity(uuid: &'static str) -> Arc<ResolveClientToken> {
    Arc::new(ResolveClientToken::new(
        Some(Arc::new(MemoryStore::default())),
        Arc::new(FixedUuid(uuid)),
        Arc::new(FixedClock(0)),
    ))
}

/// Resolver for a context without storage.
pub fn no_storage_identity() -> Arc<ResolveClientToken> {
    Arc::new(ResolveClientToken::new(
        None,
        Arc::new(FixedUuid("unused")),
        Arc::new(FixedClock(0)),
    ))
}
