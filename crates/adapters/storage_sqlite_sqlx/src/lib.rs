//! # pagekit-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `pagekit-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `pagekit-app` (for port traits) and `pagekit-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod contact_message_repo;
mod error;
mod form_repo;
mod form_response_repo;
mod image_repo;
mod job_application_repo;
mod pool;
mod quote_repo;
mod row;
mod section_repo;

pub use contact_message_repo::SqliteContactMessageRepository;
pub use error::StorageError;
pub use form_repo::SqliteFormRepository;
pub use form_response_repo::SqliteFormResponseRepository;
pub use image_repo::SqliteImageRepository;
pub use job_application_repo::SqliteJobApplicationRepository;
pub use pool::{Config, Database};
pub use quote_repo::SqliteQuoteRepository;
pub use section_repo::SqliteSectionRepository;
