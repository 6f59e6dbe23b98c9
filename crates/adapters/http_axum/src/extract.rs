//! Request extractors that reject with [`ApiError`] instead of axum's
//! plain-text defaults.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor. Any decoding failure (bad syntax, missing field,
/// wrong type, wrong content type) becomes a 400.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Parse an integer path id. Anything that is not an id cannot name an
/// existing record, so it is reported as not found.
pub(crate) fn parse_id<I: std::str::FromStr>(entity: &'static str, raw: &str) -> Result<I, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(entity, raw))
}
