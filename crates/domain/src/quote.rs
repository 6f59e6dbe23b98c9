//! Quote request: a prospective client asking for pricing.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::QuoteRequestId;
use crate::resource::{Draft, Resource};
use crate::time::Timestamp;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: QuoteRequestId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Service the quote is about, usually one of the service slugs.
    pub service: Option<String>,
    pub message: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequestPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

impl QuoteRequest {
    #[must_use]
    pub fn from_draft(id: QuoteRequestId, draft: NewQuoteRequest, created_at: Timestamp) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            service: draft.service,
            message: draft.message,
            created_at,
        }
    }
}

fn check(
    name: &str,
    email: &str,
    phone: Option<&str>,
    company: Option<&str>,
    message: &str,
) -> Result<(), ValidationError> {
    validate::required("name", name, 255)?;
    validate::email("email", email)?;
    validate::optional("phone", phone, 32)?;
    validate::optional("company", company, 255)?;
    validate::required("message", message, 10_000)
}

impl Draft for NewQuoteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            self.company.as_deref(),
            &self.message,
        )
    }
}

impl Resource for QuoteRequest {
    type Id = QuoteRequestId;
    type Draft = NewQuoteRequest;
    type Patch = QuoteRequestPatch;

    const NAME: &'static str = "QuoteRequest";

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
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
        if let Some(service) = patch.service {
            self.service = Some(service);
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            self.company.as_deref(),
            &self.message,
        )
    }
}
