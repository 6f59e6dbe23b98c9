//! The generic shape shared by every collection record.
//!
//! All collection endpoints (contact messages, job applications, images,
//! forms, form responses, quote requests) are the same list / retrieve /
//! create / replace / patch / delete pattern over one table. [`Resource`]
//! captures what varies between them so services and handlers can be
//! written once.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// A payload that can be checked before it is written.
pub trait Draft {
    /// Check field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A record stored in its own table and addressed by an integer id.
pub trait Resource: Serialize + Clone + Send + Sync + 'static {
    /// Typed primary key.
    type Id: Copy + Eq + fmt::Display + FromStr + Send + Sync + 'static;
    /// Body accepted by `POST` and `PUT`: every writable field.
    type Draft: Draft + DeserializeOwned + Send + 'static;
    /// Body accepted by `PATCH`: every writable field, all optional.
    type Patch: DeserializeOwned + Send + 'static;

    /// Human-readable name used in error messages and logs.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Overwrite every writable field, keeping id and timestamps.
    fn replace(&mut self, draft: Self::Draft);

    /// Overwrite only the fields present in `patch`.
    fn apply(&mut self, patch: Self::Patch);

    /// Check invariants on the full record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A record that owns an uploaded file.
pub trait HasAttachment {
    /// Public reference of the owned file, if any.
    fn attachment(&self) -> Option<&str>;
}
