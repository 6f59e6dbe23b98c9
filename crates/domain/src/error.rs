//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PageKitError`] via `#[from]`. Adapters map the three variants onto
//! their own failure vocabulary (HTTP status codes, log levels, …).

/// Base error for every domain and application operation.
#[derive(Debug, thiserror::Error)]
pub enum PageKitError {
    /// Input violated a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A persistence adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("field `{0}` is required")]
    MissingField(&'static str),

    /// A field exceeds its maximum length.
    #[error("field `{field}` must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// An email field does not look like an address.
    #[error("field `{0}` must be a valid email address")]
    InvalidEmail(&'static str),

    /// Section content must be a JSON object.
    #[error("section content must be a JSON object")]
    NotAnObject,

    /// Two form fields share the same name.
    #[error("duplicate form field `{0}`")]
    DuplicateFormField(String),

    /// A foreign key points to a row that does not exist.
    #[error("`{0}` refers to a record that does not exist")]
    UnknownReference(&'static str),

    /// An uploaded file is not of the accepted kind.
    #[error("field `{field}` must be {expected}")]
    UnsupportedFile {
        field: &'static str,
        expected: &'static str,
    },

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A lookup by key or id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}
