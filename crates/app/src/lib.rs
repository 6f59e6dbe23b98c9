//! # pagekit-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<R>`: table-backed CRUD for one collection record type
//!   - `SectionRepository`: keyed storage for page section documents
//!   - `MediaStore`: storage for uploaded files
//!   - `Ports`: the bundle of all of the above, chosen by the composition root
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CrudService`: list, get, create, replace, patch, delete
//!   - `SectionService`: read and write section documents, slug lookups
//!   - `AttachmentService`: CRUD for records owning an uploaded file
//!
//! ## Dependency rule
//! Depends on `pagekit-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
