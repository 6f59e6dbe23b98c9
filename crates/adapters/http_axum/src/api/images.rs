//! Image upload handlers. Listing, retrieval and metadata updates go
//! through the generic handlers in [`crate::api::crud`].

use axum::Json;
use axum::extract::{Multipart, Path, State};

use pagekit_app::ports::{Ports, Upload};
use pagekit_domain::error::ValidationError;
use pagekit_domain::image::{self, MAX_IMAGE_BYTES, NewImage, UploadedImage};
use pagekit_domain::resource::Resource;

use crate::api::crud::{CreateResponse, DeleteResponse};
use crate::api::multipart::FormData;
use crate::error::ApiError;
use crate::extract::parse_id;
use crate::state::AppState;

const FILE_FIELD: &str = "image";

/// `POST /api/images` (multipart: `image` file, `category`, `caption`)
pub async fn upload<P: Ports>(
    State(state): State<AppState<P>>,
    multipart: Multipart,
) -> Result<CreateResponse<UploadedImage>, ApiError> {
    let mut form = FormData::read(multipart, FILE_FIELD).await?;
    let file = form
        .file
        .take()
        .ok_or(ValidationError::MissingField(FILE_FIELD))?;

    let is_image = file
        .content_type
        .as_deref()
        .is_some_and(image::is_image_content_type);
    if !is_image {
        return Err(ValidationError::UnsupportedFile {
            field: FILE_FIELD,
            expected: "an image",
        }
        .into());
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::UnsupportedFile {
            field: FILE_FIELD,
            expected: "an image of at most 5 MiB",
        }
        .into());
    }

    let category = form.optional("category");
    let caption = form.optional("caption");
    let folder = match &category {
        Some(category) => format!("images/{category}"),
        None => "images".to_string(),
    };
    let upload = Upload {
        folder,
        file_name: file.file_name,
        bytes: file.bytes,
    };

    let created = state
        .images
        .create_with_upload(Some(upload), move |reference| NewImage {
            image: reference.unwrap_or_default(),
            category,
            caption,
        })
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/images/{id}` (also removes the stored file)
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id = parse_id(UploadedImage::NAME, &id)?;
    state.images.delete(id).await?;
    Ok(DeleteResponse::NoContent)
}
