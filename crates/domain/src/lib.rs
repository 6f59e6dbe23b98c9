//! # pagekit-domain
//!
//! Pure domain model for the pagekit content API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **page sections** (one JSON document per editable content block)
//!   and the catalogue of section keys the site exposes
//! - Define the **collection records** (contact messages, job applications,
//!   uploaded images, forms and their responses, quote requests)
//! - Define the [`resource::Resource`] contract every collection shares
//! - Contain all invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod id;
pub mod resource;
pub mod time;
pub mod validate;

pub mod contact_message;
pub mod form;
pub mod image;
pub mod job_application;
pub mod quote;
pub mod section;
