//! # pagekit-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api`: one route per page section
//!   (`/api/home/hero`, `/api/directors`, …) and the collection endpoints
//!   (`/api/contact-messages`, `/api/images`, …)
//! - Accept multipart uploads and serve the stored files
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `pagekit-app` (for port traits and services) and `pagekit-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
