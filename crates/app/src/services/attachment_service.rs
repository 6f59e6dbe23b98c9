//! Attachment service: records that own an uploaded file (images, résumés).
//!
//! The file is written first so its reference can be stored on the row.
//! If the row is then rejected the file is removed again; deleting the row
//! removes the file after the row is gone.

use std::sync::Arc;

use pagekit_domain::error::PageKitError;
use pagekit_domain::resource::{HasAttachment, Resource};

use crate::ports::{MediaStore, Repository, Upload};
use crate::services::crud_service::CrudService;

/// CRUD for a record type whose rows own a media file.
pub struct AttachmentService<R, Repo, M> {
    records: CrudService<R, Repo>,
    media: Arc<M>,
}

impl<R, Repo, M> AttachmentService<R, Repo, M>
where
    R: Resource + HasAttachment,
    Repo: Repository<R>,
    M: MediaStore,
{
    /// Create a new service backed by the given repository and media store.
    pub fn new(repo: Repo, media: Arc<M>) -> Self {
        Self {
            records: CrudService::new(repo),
            media,
        }
    }

    /// Plain CRUD operations that do not touch the file.
    pub fn records(&self) -> &CrudService<R, Repo> {
        &self.records
    }

    /// Store `upload` (if any), then create the record built from the
    /// resulting file reference.
    ///
    /// # Errors
    ///
    /// Returns a media error if the file cannot be stored,
    /// [`PageKitError::Validation`] if the built draft is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip_all, fields(resource = R::NAME))]
    pub async fn create_with_upload<F>(
        &self,
        upload: Option<Upload>,
        build: F,
    ) -> Result<R, PageKitError>
    where
        F: FnOnce(Option<String>) -> R::Draft + Send,
    {
        let reference = match upload {
            Some(upload) => Some(self.media.store(upload).await?),
            None => None,
        };

        match self.records.create(build(reference.clone())).await {
            Ok(record) => Ok(record),
            Err(err) => {
                if let Some(reference) = reference {
                    self.discard(&reference).await;
                }
                Err(err)
            }
        }
    }

    /// Delete the record and then the file it owns.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] for an unknown id, or a storage
    /// error from the repository. Failing to remove the file is logged,
    /// not returned.
    #[tracing::instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn delete(&self, id: R::Id) -> Result<(), PageKitError> {
        let record = self.records.get(id).await?;
        self.records.delete(id).await?;
        if let Some(reference) = record.attachment() {
            self.discard(reference).await;
        }
        Ok(())
    }

    async fn discard(&self, reference: &str) {
        if let Err(err) = self.media.remove(reference).await {
            tracing::warn!(error = %err, reference, "failed to remove media file");
        }
    }
}
