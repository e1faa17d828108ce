use serde::Serialize;
use thiserror::Error;

use crate::ids::CategoryId;

/// Client-side form validation failures. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("subject must not be empty")]
    EmptySubject,

    #[error("message body must not be empty")]
    EmptyBody,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("update contains no changes")]
    EmptyPatch,
}

/// Optional structured intake collected by the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketIntake {
    #[serde(rename = "sender_full_name", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "sender_phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "object_name", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(rename = "device_type", skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketDraft {
    pub sender_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(flatten)]
    pub intake: TicketIntake,
}

impl TicketDraft {
    pub fn new(
        sender_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender_email: sender_email.into(),
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        if !looks_like_email(&self.sender_email) {
            return Err(ValidationError::InvalidEmail(self.sender_email.clone()));
        }
        Ok(())
    }

    /// Trims free-text fields and drops blank optional ones.
    pub fn normalized(mut self) -> Self {
        self.sender_email = self.sender_email.trim().to_string();
        self.subject = self.subject.trim().to_string();
        self.body = self.body.trim().to_string();
        self.sender_name = non_blank(self.sender_name);
        self.intake.full_name = non_blank(self.intake.full_name);
        self.intake.phone = non_blank(self.intake.phone);
        self.intake.organization = non_blank(self.intake.organization);
        self.intake.device_info = non_blank(self.intake.device_info);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Body of `PATCH /api/tickets/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self == &TicketPatch::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_subject_and_body() {
        let draft = TicketDraft::new("a@b.com", "  ", "body");
        assert_eq!(draft.validate(), Err(ValidationError::EmptySubject));

        let draft = TicketDraft::new("a@b.com", "subject", "\n");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn validate_rejects_malformed_email() {
        for email in ["", "plain", "@example.com", "user@", "us er@example.com"] {
            let draft = TicketDraft::new(email, "subject", "body");
            assert!(
                matches!(draft.validate(), Err(ValidationError::InvalidEmail(_))),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn draft_serializes_intake_under_backend_names() {
        let mut draft = TicketDraft::new("a@b.com", "Meter", "Broken display");
        draft.client_token = Some("tok".into());
        draft.intake = TicketIntake {
            full_name: Some("Ivan Petrov".into()),
            phone: None,
            organization: Some("Plant 7".into()),
            device_info: Some("ERIS-200".into()),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["sender_full_name"], "Ivan Petrov");
        assert_eq!(value["object_name"], "Plant 7");
        assert_eq!(value["device_type"], "ERIS-200");
        assert_eq!(value["client_token"], "tok");
        assert!(value.get("sender_phone").is_none());
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let mut draft = TicketDraft::new(" a@b.com ", " s ", " b ");
        draft.sender_name = Some("   ".into());
        let draft = draft.normalized();
        assert_eq!(draft.sender_email, "a@b.com");
        assert_eq!(draft.sender_name, None);
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_eq!(TicketPatch::default().validate(), Err(ValidationError::EmptyPatch));
        let patch = TicketPatch {
            status: Some("closed".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"status":"closed"}"#);
    }
}
