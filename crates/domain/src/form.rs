//! Forms built in the editor and the responses visitors submit to them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::id::{FormId, FormResponseId};
use crate::resource::{Draft, Resource};
use crate::time::Timestamp;
use crate::validate;

/// Input widget rendered for a [`FormField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Select,
    Checkbox,
    File,
}

/// One question of a [`Form`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

fn default_active() -> bool {
    true
}

/// Writable fields of a [`Form`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Partial update of a [`Form`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<FormField>>,
    pub is_active: Option<bool>,
}

impl Form {
    #[must_use]
    pub fn from_draft(id: FormId, draft: NewForm, created_at: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            fields: draft.fields,
            is_active: draft.is_active,
            created_at,
        }
    }
}

fn check_form(title: &str, fields: &[FormField]) -> Result<(), ValidationError> {
    validate::required("title", title, 200)?;
    let mut seen = HashSet::new();
    for field in fields {
        validate::required("fields.name", &field.name, 100)?;
        if !seen.insert(field.name.as_str()) {
            return Err(ValidationError::DuplicateFormField(field.name.clone()));
        }
    }
    Ok(())
}

impl Draft for NewForm {
    fn validate(&self) -> Result<(), ValidationError> {
        check_form(&self.title, &self.fields)
    }
}

impl Resource for Form {
    type Id = FormId;
    type Draft = NewForm;
    type Patch = FormPatch;

    const NAME: &'static str = "Form";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn replace(&mut self, draft: Self::Draft) {
        *self = Self::from_draft(self.id, draft, self.created_at);
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(fields) = patch.fields {
            self.fields = fields;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_form(&self.title, &self.fields)
    }
}

/// Answers submitted against a [`Form`], keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub id: FormResponseId,
    pub form: FormId,
    pub data: Map<String, Value>,
    pub submitted_at: Timestamp,
}

/// Writable fields of a [`FormResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewFormResponse {
    pub form: FormId,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Partial update of a [`FormResponse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormResponsePatch {
    pub form: Option<FormId>,
    pub data: Option<Map<String, Value>>,
}

impl FormResponse {
    #[must_use]
    pub fn from_draft(id: FormResponseId, draft: NewFormResponse, submitted_at: Timestamp) -> Self {
        Self {
            id,
            form: draft.form,
            data: draft.data,
            submitted_at,
        }
    }
}

// Existence of `form` is enforced by the storage foreign key.
impl Draft for NewFormResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Resource for FormResponse {
    type Id = FormResponseId;
    type Draft = NewFormResponse;
    type Patch = FormResponsePatch;

    const NAME: &'static str = "FormResponse";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn replace(&mut self, draft: Self::Draft) {
        *self = Self::from_draft(self.id, draft, self.submitted_at);
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(form) = patch.form {
            self.form = form;
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_form_with_field_defaults() {
        let draft: NewForm = serde_json::from_value(serde_json::json!({
            "title": "Request a site visit",
            "fields": [
                { "name": "full_name", "label": "Full name", "required": true },
                { "name": "budget", "type": "select", "options": ["< 1M", "> 1M"] }
            ]
        }))
        .unwrap();

        assert!(draft.is_active);
        assert_eq!(draft.fields[0].kind, FieldKind::Text);
        assert_eq!(draft.fields[1].kind, FieldKind::Select);
        assert!(!draft.fields[1].required);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn should_reject_duplicate_field_names() {
        let field = FormField {
            name: "email".to_string(),
            label: String::new(),
            kind: FieldKind::Email,
            required: true,
            options: vec![],
        };
        let draft = NewForm {
            title: "Newsletter".to_string(),
            description: None,
            fields: vec![field.clone(), field],
            is_active: true,
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::DuplicateFormField("email".to_string()))
        );
    }

    #[test]
    fn should_require_form_reference_in_response() {
        let result: Result<NewFormResponse, _> =
            serde_json::from_value(serde_json::json!({ "data": { "a": 1 } }));
        assert!(result.is_err());
    }
}
