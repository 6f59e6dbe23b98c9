//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod attachment_service;
pub mod crud_service;
pub mod section_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use attachment_service::AttachmentService;
pub use crud_service::CrudService;
pub use section_service::SectionService;
