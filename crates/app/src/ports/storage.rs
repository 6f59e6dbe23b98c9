//! Storage port: repository traits for persistence.

use std::future::Future;

use pagekit_domain::error::PageKitError;
use pagekit_domain::resource::Resource;
use pagekit_domain::section::Section;

/// Table-backed persistence for one collection record type.
pub trait Repository<R: Resource> {
    /// Insert a new row and return the stored record with its assigned id.
    fn create(&self, draft: R::Draft) -> impl Future<Output = Result<R, PageKitError>> + Send;

    /// Get a record by its id.
    fn get_by_id(&self, id: R::Id) -> impl Future<Output = Result<Option<R>, PageKitError>> + Send;

    /// Get all records in the collection's natural order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<R>, PageKitError>> + Send;

    /// Overwrite an existing row. Returns [`PageKitError::NotFound`] when the
    /// row no longer exists.
    fn update(&self, record: R) -> impl Future<Output = Result<R, PageKitError>> + Send;

    /// Delete a record, returning whether a row was removed.
    fn delete(&self, id: R::Id) -> impl Future<Output = Result<bool, PageKitError>> + Send;
}

/// Keyed document storage for page sections.
pub trait SectionRepository {
    /// Get the document stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Section>, PageKitError>> + Send;

    /// Insert or overwrite the document stored under `section.key`.
    fn save(&self, section: Section) -> impl Future<Output = Result<Section, PageKitError>> + Send;

    /// Delete the document stored under `key`, returning whether one existed.
    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, PageKitError>> + Send;
}
