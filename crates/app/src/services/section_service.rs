//! Section service: use-cases for the page section documents.

use serde_json::{Map, Value};

use pagekit_domain::error::{NotFoundError, PageKitError};
use pagekit_domain::section::{SERVICE_PAGES, Section};
use pagekit_domain::time;

use crate::ports::SectionRepository;

/// Application service for page section documents.
pub struct SectionService<R> {
    repo: R,
}

impl<R: SectionRepository> SectionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a section document by key.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] when the section was never
    /// written, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Section, PageKitError> {
        self.repo
            .get(key)
            .await?
            .ok_or_else(|| NotFoundError::new("Section", key).into())
    }

    /// Store `content` as the whole document, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::Validation`] if `content` is not a JSON
    /// object, or a storage error from the repository.
    #[tracing::instrument(skip(self, content))]
    pub async fn replace(&self, key: &str, content: Value) -> Result<Section, PageKitError> {
        let section = Section::new(key, content, time::now())?;
        let saved = self.repo.save(section).await?;
        tracing::info!(section = key, "section replaced");
        Ok(saved)
    }

    /// Merge the top-level keys of `patch` into the document. A section
    /// that was never written starts out empty.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::Validation`] if `patch` is not a JSON
    /// object, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn patch(&self, key: &str, patch: Value) -> Result<Section, PageKitError> {
        let now = time::now();
        let mut section = match self.repo.get(key).await? {
            Some(section) => section,
            None => Section {
                key: key.to_string(),
                content: Map::new(),
                updated_at: now,
            },
        };
        section.merge(patch, now)?;
        let saved = self.repo.save(section).await?;
        tracing::info!(section = key, "section patched");
        Ok(saved)
    }

    /// Delete a section document.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] when the section was never
    /// written, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<(), PageKitError> {
        if self.repo.delete(key).await? {
            tracing::info!(section = key, "section deleted");
            Ok(())
        } else {
            Err(NotFoundError::new("Section", key).into())
        }
    }

    /// Return the item of section `key` whose `slug` matches.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::NotFound`] when either the section or the
    /// item is missing, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_slug(
        &self,
        key: &str,
        slug: &str,
    ) -> Result<Map<String, Value>, PageKitError> {
        let section = self.get(key).await?;
        section
            .find_by_slug(slug)
            .cloned()
            .ok_or_else(|| NotFoundError::new("SectionItem", slug).into())
    }

    /// Slugs of the service pages, empty when none were published yet.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn service_slugs(&self) -> Result<Vec<String>, PageKitError> {
        Ok(self
            .repo
            .get(SERVICE_PAGES)
            .await?
            .map(|section| section.slugs())
            .unwrap_or_default())
    }
}
