//! Contact message: a submission from the public contact form.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ContactMessageId;
use crate::resource::{Draft, Resource};
use crate::time::Timestamp;
use crate::validate;

/// A message left by a visitor through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Writable fields of a [`ContactMessage`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
}

/// Partial update of a [`ContactMessage`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessagePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

impl ContactMessage {
    /// Materialise a stored message from its draft.
    #[must_use]
    pub fn from_draft(id: ContactMessageId, draft: NewContactMessage, created_at: Timestamp) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            subject: draft.subject,
            message: draft.message,
            is_read: draft.is_read,
            created_at,
        }
    }
}

fn check(
    name: &str,
    email: &str,
    phone: Option<&str>,
    subject: Option<&str>,
    message: &str,
) -> Result<(), ValidationError> {
    validate::required("name", name, 255)?;
    validate::email("email", email)?;
    validate::optional("phone", phone, 32)?;
    validate::optional("subject", subject, 255)?;
    validate::required("message", message, 10_000)
}

impl Draft for NewContactMessage {
    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            self.subject.as_deref(),
            &self.message,
        )
    }
}

impl Resource for ContactMessage {
    type Id = ContactMessageId;
    type Draft = NewContactMessage;
    type Patch = ContactMessagePatch;

    const NAME: &'static str = "ContactMessage";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn replace(&mut self, draft: Self::Draft) {
        *self = Self::from_draft(self.id, draft, self.created_at);
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(subject) = patch.subject {
            self.subject = Some(subject);
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(is_read) = patch.is_read {
            self.is_read = is_read;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            self.subject.as_deref(),
            &self.message,
        )
    }
}
