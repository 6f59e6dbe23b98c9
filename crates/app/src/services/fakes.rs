//! In-memory port implementations for service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use pagekit_domain::contact_message::ContactMessage;
use pagekit_domain::error::{NotFoundError, PageKitError};
use pagekit_domain::id::{ContactMessageId, ImageId, JobApplicationId};
use pagekit_domain::image::UploadedImage;
use pagekit_domain::job_application::JobApplication;
use pagekit_domain::resource::Resource;
use pagekit_domain::section::Section;
use pagekit_domain::time::now;

use crate::ports::{MediaStore, Repository, SectionRepository, Upload};

pub struct InMemoryRepo<R> {
    rows: Mutex<BTreeMap<i64, R>>,
}

impl<R> Default for InMemoryRepo<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

macro_rules! in_memory_repository {
    ($record:ty, $id:ty) => {
        impl Repository<$record> for InMemoryRepo<$record> {
            fn create(
                &self,
                draft: <$record as Resource>::Draft,
            ) -> impl Future<Output = Result<$record, PageKitError>> + Send {
                let mut rows = self.rows.lock().unwrap();
                let next = rows.keys().next_back().map_or(1, |last| last + 1);
                let record = <$record>::from_draft(<$id>::new(next), draft, now());
                rows.insert(next, record.clone());
                async { Ok(record) }
            }

            fn get_by_id(
                &self,
                id: $id,
            ) -> impl Future<Output = Result<Option<$record>, PageKitError>> + Send {
                let result = self.rows.lock().unwrap().get(&id.get()).cloned();
                async { Ok(result) }
            }

            fn get_all(&self) -> impl Future<Output = Result<Vec<$record>, PageKitError>> + Send {
                let result: Vec<$record> = self.rows.lock().unwrap().values().cloned().collect();
                async { Ok(result) }
            }

            fn update(
                &self,
                record: $record,
            ) -> impl Future<Output = Result<$record, PageKitError>> + Send {
                let mut rows = self.rows.lock().unwrap();
                let result: Result<$record, PageKitError> = match rows.get_mut(&record.id.get()) {
                    Some(row) => {
                        *row = record.clone();
                        Ok(record)
                    }
                    None => Err(NotFoundError::new(<$record>::NAME, record.id).into()),
                };
                async { result }
            }

            fn delete(&self, id: $id) -> impl Future<Output = Result<bool, PageKitError>> + Send {
                let removed = self.rows.lock().unwrap().remove(&id.get()).is_some();
                async move { Ok(removed) }
            }
        }
    };
}

in_memory_repository!(ContactMessage, ContactMessageId);
in_memory_repository!(JobApplication, JobApplicationId);
in_memory_repository!(UploadedImage, ImageId);

#[derive(Default)]
pub struct InMemorySections {
    docs: Mutex<BTreeMap<String, Section>>,
}

impl SectionRepository for InMemorySections {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Section>, PageKitError>> + Send {
        let result = self.docs.lock().unwrap().get(key).cloned();
        async { Ok(result) }
    }

    fn save(&self, section: Section) -> impl Future<Output = Result<Section, PageKitError>> + Send {
        self.docs
            .lock()
            .unwrap()
            .insert(section.key.clone(), section.clone());
        async { Ok(section) }
    }

    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, PageKitError>> + Send {
        let removed = self.docs.lock().unwrap().remove(key).is_some();
        async move { Ok(removed) }
    }
}

#[derive(Default)]
pub struct InMemoryMedia {
    files: Mutex<Vec<String>>,
}

impl InMemoryMedia {
    pub fn stored(&self) -> Vec<String> {
        self.files.lock().unwrap().clone()
    }
}

impl MediaStore for InMemoryMedia {
    fn store(&self, upload: Upload) -> impl Future<Output = Result<String, PageKitError>> + Send {
        let reference = format!("/media/{}/{}", upload.folder, upload.file_name);
        self.files.lock().unwrap().push(reference.clone());
        async { Ok(reference) }
    }

    fn remove(&self, reference: &str) -> impl Future<Output = Result<(), PageKitError>> + Send {
        self.files.lock().unwrap().retain(|f| f != reference);
        async { Ok(()) }
    }
}
