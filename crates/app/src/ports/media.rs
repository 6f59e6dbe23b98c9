//! Media port: storage for uploaded files.

use std::future::Future;

use pagekit_domain::error::PageKitError;

/// A file received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Logical folder such as `images/gallery` or `resumes`.
    pub folder: String,
    /// Name supplied by the client.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where uploaded files live.
pub trait MediaStore {
    /// Persist `upload` and return the public reference to it.
    fn store(&self, upload: Upload) -> impl Future<Output = Result<String, PageKitError>> + Send;

    /// Remove the file behind `reference`. Unknown references are ignored.
    fn remove(&self, reference: &str) -> impl Future<Output = Result<(), PageKitError>> + Send;
}
