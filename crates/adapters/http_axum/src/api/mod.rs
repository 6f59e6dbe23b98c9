//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod crud;
#[allow(clippy::missing_errors_doc)]
pub mod images;
#[allow(clippy::missing_errors_doc)]
pub mod job_applications;
mod multipart;
#[allow(clippy::missing_errors_doc)]
pub mod sections;

use axum::Router;
use axum::routing::{self, MethodRouter};

use pagekit_app::ports::Ports;
use pagekit_domain::contact_message::ContactMessage;
use pagekit_domain::form::{Form, FormResponse};
use pagekit_domain::image::UploadedImage;
use pagekit_domain::job_application::JobApplication;
use pagekit_domain::quote::QuoteRequest;
use pagekit_domain::section::SECTIONS;

use crate::state::AppState;

/// Register `method` under `path` both with and without a trailing slash.
fn route<S>(router: Router<S>, path: &str, method: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route(path, method.clone())
        .route(&format!("{path}/"), method)
}

/// Build the `/api` sub-router.
pub fn routes<P: Ports>() -> Router<AppState<P>> {
    type S<P> = AppState<P>;

    let collections: Vec<(&str, &str, MethodRouter<S<P>>)> = vec![
        // Contact messages
        (
            "/contact-messages",
            "contact-messages-list",
            crud::collection::<S<P>, ContactMessage>(),
        ),
        (
            "/contact-messages/{id}",
            "contact-messages-detail",
            crud::member::<S<P>, ContactMessage>(),
        ),
        // Job applications
        (
            "/job-applications",
            "job-applications-list",
            routing::get(crud::list::<S<P>, JobApplication>)
                .post(job_applications::create::<P>),
        ),
        (
            "/job-applications/{id}",
            "job-applications-detail",
            routing::get(crud::retrieve::<S<P>, JobApplication>)
                .put(crud::replace::<S<P>, JobApplication>)
                .patch(crud::patch::<S<P>, JobApplication>)
                .delete(job_applications::delete::<P>),
        ),
        // Images
        (
            "/images",
            "images-list",
            routing::get(crud::list::<S<P>, UploadedImage>).post(images::upload::<P>),
        ),
        (
            "/images/{id}",
            "images-detail",
            routing::get(crud::retrieve::<S<P>, UploadedImage>)
                .patch(crud::patch::<S<P>, UploadedImage>)
                .delete(images::delete::<P>),
        ),
        // Forms
        ("/forms", "forms-list", crud::collection::<S<P>, Form>()),
        ("/forms/{id}", "forms-detail", crud::member::<S<P>, Form>()),
        (
            "/form_responses",
            "form-responses-list",
            crud::collection::<S<P>, FormResponse>(),
        ),
        (
            "/form_responses/{id}",
            "form-responses-detail",
            crud::member::<S<P>, FormResponse>(),
        ),
        // Quotes
        ("/quote", "quote-list", crud::collection::<S<P>, QuoteRequest>()),
        ("/quote/{id}", "quote-detail", crud::member::<S<P>, QuoteRequest>()),
        // Service pages
        (
            "/get-service-slugs",
            "get-service-slugs",
            routing::get(sections::service_slugs::<P>),
        ),
    ];

    let router = collections
        .into_iter()
        .fold(Router::new(), |router, (path, name, method)| {
            tracing::trace!(path, name, "registering route");
            route(router, path, method)
        });

    SECTIONS.iter().fold(router, |router, def| {
        tracing::trace!(path = def.key, name = def.name, "registering section route");
        route(router, &format!("/{}", def.key), sections::methods::<P>(def))
    })
}
