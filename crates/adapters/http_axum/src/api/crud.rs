//! Generic JSON REST handlers shared by every collection endpoint.
//!
//! Each handler is instantiated per record type through [`Provides`], so a
//! collection only needs a route entry in [`crate::api::routes`].

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{self, MethodRouter};

use pagekit_domain::resource::Resource;

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::Provides;

/// Possible responses from the list endpoint.
pub enum ListResponse<R> {
    Ok(Json<Vec<R>>),
}

impl<R: serde::Serialize> IntoResponse for ListResponse<R> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the retrieve, replace and patch endpoints.
pub enum GetResponse<R> {
    Ok(Json<R>),
}

impl<R: serde::Serialize> IntoResponse for GetResponse<R> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse<R> {
    Created(Json<R>),
}

impl<R: serde::Serialize> IntoResponse for CreateResponse<R> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/{collection}`
pub async fn list<S, R>(State(state): State<S>) -> Result<ListResponse<R>, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let records = state.crud().list().await?;
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/{collection}/{id}`
pub async fn retrieve<S, R>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<GetResponse<R>, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let id = parse_id::<R::Id>(R::NAME, &id)?;
    let record = state.crud().get(id).await?;
    Ok(GetResponse::Ok(Json(record)))
}

/// `POST /api/{collection}`
pub async fn create<S, R>(
    State(state): State<S>,
    ApiJson(draft): ApiJson<R::Draft>,
) -> Result<CreateResponse<R>, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let created = state.crud().create(draft).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/{collection}/{id}`
pub async fn replace<S, R>(
    State(state): State<S>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<R::Draft>,
) -> Result<GetResponse<R>, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let id = parse_id::<R::Id>(R::NAME, &id)?;
    let updated = state.crud().replace(id, draft).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `PATCH /api/{collection}/{id}`
pub async fn patch<S, R>(
    State(state): State<S>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> Result<GetResponse<R>, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let id = parse_id::<R::Id>(R::NAME, &id)?;
    let updated = state.crud().patch(id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/{collection}/{id}`
pub async fn delete<S, R>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Provides<R>,
    R: Resource,
{
    let id = parse_id::<R::Id>(R::NAME, &id)?;
    state.crud().delete(id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET` list and `POST` create.
pub fn collection<S, R>() -> MethodRouter<S>
where
    S: Provides<R>,
    R: Resource,
{
    routing::get(list::<S, R>).post(create::<S, R>)
}

/// `GET`, `PUT`, `PATCH` and `DELETE` on a single record.
pub fn member<S, R>() -> MethodRouter<S>
where
    S: Provides<R>,
    R: Resource,
{
    routing::get(retrieve::<S, R>)
        .put(replace::<S, R>)
        .patch(patch::<S, R>)
        .delete(delete::<S, R>)
}
