//! Page section handlers, registered once per entry of
//! [`SECTIONS`](pagekit_domain::section::SECTIONS).

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{self, MethodRouter};
use serde::Deserialize;
use serde_json::{Map, Value};

use pagekit_app::ports::Ports;
use pagekit_domain::section::SectionDef;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Query string accepted by `GET`.
#[derive(Deserialize)]
pub struct SlugQuery {
    pub slug: Option<String>,
}

/// Possible responses from the section endpoints.
pub enum SectionResponse {
    Ok(Json<Map<String, Value>>),
    Created(Json<Map<String, Value>>),
    NoContent,
}

impl IntoResponse for SectionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/{section}` and `GET /api/{section}?slug={slug}`
pub async fn show<P: Ports>(
    state: &AppState<P>,
    key: &str,
    query: SlugQuery,
) -> Result<SectionResponse, ApiError> {
    let content = match query.slug {
        Some(slug) => state.sections.find_by_slug(key, &slug).await?,
        None => state.sections.get(key).await?.content,
    };
    Ok(SectionResponse::Ok(Json(content)))
}

/// `POST /api/{section}` (201) and `PUT /api/{section}` (200)
pub async fn replace<P: Ports>(
    state: &AppState<P>,
    key: &str,
    body: Value,
    created: bool,
) -> Result<SectionResponse, ApiError> {
    let section = state.sections.replace(key, body).await?;
    if created {
        Ok(SectionResponse::Created(Json(section.content)))
    } else {
        Ok(SectionResponse::Ok(Json(section.content)))
    }
}

/// `PATCH /api/{section}`
pub async fn patch<P: Ports>(
    state: &AppState<P>,
    key: &str,
    body: Value,
) -> Result<SectionResponse, ApiError> {
    let section = state.sections.patch(key, body).await?;
    Ok(SectionResponse::Ok(Json(section.content)))
}

/// `DELETE /api/{section}`
pub async fn delete<P: Ports>(state: &AppState<P>, key: &str) -> Result<SectionResponse, ApiError> {
    state.sections.delete(key).await?;
    Ok(SectionResponse::NoContent)
}

/// `GET /api/get-service-slugs`
pub async fn service_slugs<P: Ports>(
    State(state): State<AppState<P>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.sections.service_slugs().await?))
}

/// All five verbs for the section `def`.
pub fn methods<P: Ports>(def: &SectionDef) -> MethodRouter<AppState<P>> {
    let key = def.key;
    routing::get(
        move |State(state): State<AppState<P>>,
              query: Result<Query<SlugQuery>, QueryRejection>| async move {
            match query {
                Ok(Query(query)) => show(&state, key, query).await,
                Err(rejection) => Err(ApiError::from(rejection)),
            }
        },
    )
    .post(
        move |State(state): State<AppState<P>>, ApiJson(body): ApiJson<Value>| async move {
            replace(&state, key, body, true).await
        },
    )
    .put(
        move |State(state): State<AppState<P>>, ApiJson(body): ApiJson<Value>| async move {
            replace(&state, key, body, false).await
        },
    )
    .patch(
        move |State(state): State<AppState<P>>, ApiJson(body): ApiJson<Value>| async move {
            patch(&state, key, body).await
        },
    )
    .delete(move |State(state): State<AppState<P>>| async move { delete(&state, key).await })
}
