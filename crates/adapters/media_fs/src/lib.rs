//! # pagekit-adapter-media-fs
//!
//! Stores uploaded files on the local filesystem.
//!
//! ## Responsibilities
//! - Implement [`MediaStore`] from `pagekit-app::ports::media`
//! - Keep every file under a single root directory
//! - Hand out public references (`{url_prefix}/{folder}/{file}`) that the
//!   HTTP adapter serves as static files
//!
//! ## Dependency rule
//! Depends on `pagekit-app` (for the port trait) and `pagekit-domain` (for the
//! error type). Nothing else references this adapter except the binary.

use std::path::{Path, PathBuf};

use pagekit_app::ports::{MediaStore, Upload};
use pagekit_domain::error::PageKitError;

/// Errors raised while touching the media directory.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Reading or writing a file failed.
    #[error("media i/o error")]
    Io(#[from] std::io::Error),
}

impl From<MediaError> for PageKitError {
    fn from(err: MediaError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// [`MediaStore`] writing into a directory on disk.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl FsMediaStore {
    /// Create a store rooted at `root`, publishing files under `url_prefix`
    /// (e.g. `/media`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Directory the files are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a public reference back to a path under the root.
    ///
    /// Returns `None` for references this store did not hand out.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference
            .strip_prefix(self.url_prefix.as_str())?
            .strip_prefix('/')?;
        let mut path = self.root.clone();
        for segment in relative.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}

fn clean_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

fn clean_folder(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(clean_segment)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn clean_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let name = clean_segment(base);
    if name.is_empty() {
        "file".to_string()
    } else {
        name
    }
}

impl MediaStore for FsMediaStore {
    async fn store(&self, upload: Upload) -> Result<String, PageKitError> {
        let folder = clean_folder(&upload.folder);
        let file_name = format!(
            "{}-{}",
            uuid::Uuid::new_v4().simple(),
            clean_file_name(&upload.file_name)
        );

        let mut dir = self.root.clone();
        dir.extend(&folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(MediaError::from)?;
        tokio::fs::write(dir.join(&file_name), &upload.bytes)
            .await
            .map_err(MediaError::from)?;

        let mut reference = self.url_prefix.clone();
        for segment in folder.iter().chain(std::iter::once(&file_name)) {
            reference.push('/');
            reference.push_str(segment);
        }
        tracing::debug!(%reference, size = upload.bytes.len(), "media stored");
        Ok(reference)
    }

    async fn remove(&self, reference: &str) -> Result<(), PageKitError> {
        let Some(path) = self.resolve(reference) else {
            tracing::debug!(reference, "ignoring foreign media reference");
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(reference, "media removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(MediaError::from(err).into()),
        }
    }
}
