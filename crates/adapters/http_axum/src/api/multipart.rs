//! Collects a `multipart/form-data` body into text fields and one file.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::ApiError;

/// The uploaded file part of a form.
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Text fields of a form plus the file sent under the expected name.
#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<FilePart>,
}

impl FormData {
    /// Drain `multipart`, keeping the part named `file_field` as the file.
    /// An empty file part (a form submitted without choosing a file) is
    /// treated as absent.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == file_field {
                let file_name = field.file_name().unwrap_or(file_field).to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.file = Some(FilePart {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    /// A text field, empty when absent so validation reports it.
    pub fn required(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// A text field, `None` when absent or blank.
    pub fn optional(&mut self, name: &str) -> Option<String> {
        self.fields
            .remove(name)
            .filter(|value| !value.trim().is_empty())
    }
}
