//! Job application submission and deletion. Applications arrive either as
//! JSON or as a multipart form carrying a `resume` file.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;

use pagekit_app::ports::{Ports, Upload};
use pagekit_domain::job_application::{JobApplication, NewJobApplication};
use pagekit_domain::resource::Resource;

use crate::api::crud::{CreateResponse, DeleteResponse};
use crate::api::multipart::FormData;
use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::AppState;

const FILE_FIELD: &str = "resume";
const MULTIPART: &str = "multipart/form-data";

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.get(..MULTIPART.len()))
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART))
}

/// `POST /api/job-applications`
pub async fn create<P: Ports>(
    State(state): State<AppState<P>>,
    request: Request,
) -> Result<CreateResponse<JobApplication>, ApiError> {
    if !is_multipart(&request) {
        let ApiJson(draft) = ApiJson::<NewJobApplication>::from_request(request, &state).await?;
        let created = state.job_applications.records().create(draft).await?;
        return Ok(CreateResponse::Created(Json(created)));
    }

    let multipart = Multipart::from_request(request, &state).await?;
    let mut form = FormData::read(multipart, FILE_FIELD).await?;
    let upload = form.file.take().map(|file| Upload {
        folder: "resumes".to_string(),
        file_name: file.file_name,
        bytes: file.bytes,
    });
    let name = form.required("name");
    let email = form.required("email");
    let phone = form.optional("phone");
    let position = form.required("position");
    let cover_letter = form.optional("cover_letter");

    let created = state
        .job_applications
        .create_with_upload(upload, move |resume| NewJobApplication {
            name,
            email,
            phone,
            position,
            cover_letter,
            resume,
        })
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/job-applications/{id}` (also removes the résumé file)
pub async fn delete<P: Ports>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let id = parse_id(JobApplication::NAME, &id)?;
    state.job_applications.delete(id).await?;
    Ok(DeleteResponse::NoContent)
}
