//! Axum router assembly.

use std::path::PathBuf;

use axum::Router;
use axum::extract::{DefaultBodyLimit, OriginalUri};
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use pagekit_app::ports::Ports;

use crate::error::ApiError;
use crate::state::AppState;

/// HTTP-level settings that are not part of the application state.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Directory holding uploaded files.
    pub media_root: PathBuf,
    /// Public path the media directory is served under (e.g. `/media`).
    pub media_url: String,
    /// Origins allowed to call the API from a browser. `*` allows any.
    pub cors_origins: Vec<String>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and serves the media directory under
/// [`HttpConfig::media_url`]. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<P: Ports>(state: AppState<P>, config: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes::<P>())
        .nest_service(&config.media_url, ServeDir::new(&config.media_root))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found("Route", uri.path())
}
