//! Generic CRUD service: the single use-case implementation behind every
//! collection endpoint.

use std::marker::PhantomData;

use pagekit_domain::error::{NotFoundError, PageKitError};
use pagekit_domain::resource::{Draft, Resource};

use crate::ports::Repository;

/// List / retrieve / create / replace / patch / delete for one record type.
pub struct CrudService<R, Repo> {
    repo: Repo,
    _record: PhantomData<fn() -> R>,
}

impl<R, Repo> CrudService<R, Repo>
where
    R: Resource,
    Repo: Repository<R>,
{
    /// Create a new service backed by the given repository.
    pub fn new(repo: Repo) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// List every record.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(resource = R::NAME))]
    pub async fn list(&self) -> Result<Vec<R>, PageKitError> {
        self.repo.get_all().await
    }

    /// Look up a record by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn get(&self, id: R::Id) -> Result<R, PageKitError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(R::NAME, id).into())
    }

    /// Validate and insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(resource = R::NAME))]
    pub async fn create(&self, draft: R::Draft) -> Result<R, PageKitError> {
        draft.validate()?;
        let record = self.repo.create(draft).await?;
        tracing::info!(resource = R::NAME, id = %record.id(), "record created");
        Ok(record)
    }

    /// Overwrite every writable field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] for an unknown id,
    /// [`PageKitError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn replace(&self, id: R::Id, draft: R::Draft) -> Result<R, PageKitError> {
        let mut record = self.get(id).await?;
        record.replace(draft);
        record.validate()?;
        self.repo.update(record).await
    }

    /// Overwrite only the fields present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] for an unknown id,
    /// [`PageKitError::Validation`] if the patched record breaks an
    /// invariant, or a storage error.
    #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn patch(&self, id: R::Id, patch: R::Patch) -> Result<R, PageKitError> {
        let mut record = self.get(id).await?;
        record.apply(patch);
        record.validate()?;
        self.repo.update(record).await
    }

    /// Delete a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] for an unknown id, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn delete(&self, id: R::Id) -> Result<(), PageKitError> {
        if self.repo.delete(id).await? {
            tracing::info!(resource = R::NAME, id = %id, "record deleted");
            Ok(())
        } else {
            Err(NotFoundError::new(R::NAME, id).into())
        }
    }
}
