//! Uploaded image: a picture referenced by page section content.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ImageId;
use crate::resource::{Draft, HasAttachment, Resource};
use crate::time::Timestamp;
use crate::validate;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A stored image file and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub id: ImageId,
    /// Public reference of the stored file.
    pub image: String,
    /// Free-form grouping such as `director_photos` or `gallery`.
    pub category: Option<String>,
    pub caption: Option<String>,
    pub uploaded_at: Timestamp,
}

/// Writable fields of an [`UploadedImage`], known once the file is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewImage {
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Metadata that may change after upload. The file itself is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePatch {
    pub category: Option<String>,
    pub caption: Option<String>,
}

impl UploadedImage {
    #[must_use]
    pub fn from_draft(id: ImageId, draft: NewImage, uploaded_at: Timestamp) -> Self {
        Self {
            id,
            image: draft.image,
            category: draft.category,
            caption: draft.caption,
            uploaded_at,
        }
    }
}

/// Whether an upload's declared content type is an image.
#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().to_ascii_lowercase().starts_with("image/"))
}

fn check(image: &str, category: Option<&str>, caption: Option<&str>) -> Result<(), ValidationError> {
    validate::required("image", image, 500)?;
    validate::optional("category", category, 100)?;
    validate::optional("caption", caption, 255)
}

impl Draft for NewImage {
    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.image, self.category.as_deref(), self.caption.as_deref())
    }
}

impl Resource for UploadedImage {
    type Id = ImageId;
    type Draft = NewImage;
    type Patch = ImagePatch;

    const NAME: &'static str = "UploadedImage";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn replace(&mut self, draft: Self::Draft) {
        *self = Self::from_draft(self.id, draft, self.uploaded_at);
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(caption) = patch.caption {
            self.caption = Some(caption);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check(&self.image, self.category.as_deref(), self.caption.as_deref())
    }
}

impl HasAttachment for UploadedImage {
    fn attachment(&self) -> Option<&str> {
        Some(&self.image)
    }
}
