//! Job application: a candidate's response to a posted opening.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::JobApplicationId;
use crate::resource::{Draft, HasAttachment, Resource};
use crate::time::Timestamp;
use crate::validate;

/// A submitted application, optionally carrying an uploaded résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: JobApplicationId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub cover_letter: Option<String>,
    /// Public reference of the stored résumé file.
    pub resume: Option<String>,
    pub applied_at: Timestamp,
}

/// Writable fields of a [`JobApplication`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobApplication {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub position: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Set only from a stored upload, never from the request body.
    #[serde(skip_deserializing)]
    pub resume: Option<String>,
}

/// Partial update of a [`JobApplication`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobApplicationPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub cover_letter: Option<String>,
}

impl JobApplication {
    /// Materialise a stored application from its draft.
    #[must_use]
    pub fn from_draft(id: JobApplicationId, draft: NewJobApplication, applied_at: Timestamp) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            position: draft.position,
            cover_letter: draft.cover_letter,
            resume: draft.resume,
            applied_at,
        }
    }
}

fn check(
    name: &str,
    email: &str,
    phone: Option<&str>,
    position: &str,
    cover_letter: Option<&str>,
) -> Result<(), ValidationError> {
    validate::required("name", name, 255)?;
    validate::email("email", email)?;
    validate::optional("phone", phone, 32)?;
    validate::required("position", position, 150)?;
    validate::optional("cover_letter", cover_letter, 10_000)
}

impl Draft for NewJobApplication {
    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            &self.position,
            self.cover_letter.as_deref(),
        )
    }
}

impl Resource for JobApplication {
    type Id = JobApplicationId;
    type Draft = NewJobApplication;
    type Patch = JobApplicationPatch;

    const NAME: &'static str = "JobApplication";

    fn id(&self) -> Self::Id {
        self.id
    }

    /// The résumé is owned by the stored file and survives a replace.
    fn replace(&mut self, draft: Self::Draft) {
        let resume = self.resume.take();
        *self = Self::from_draft(self.id, draft, self.applied_at);
        self.resume = resume;
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
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(cover_letter) = patch.cover_letter {
            self.cover_letter = Some(cover_letter);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check(
            &self.name,
            &self.email,
            self.phone.as_deref(),
            &self.position,
            self.cover_letter.as_deref(),
        )
    }
}

impl HasAttachment for JobApplication {
    fn attachment(&self) -> Option<&str> {
        self.resume.as_deref()
    }
}
