//! Shared application state for axum handlers.

use std::sync::Arc;

use pagekit_app::ports::{Ports, Repository};
use pagekit_app::services::{AttachmentService, CrudService, SectionService};
use pagekit_domain::contact_message::ContactMessage;
use pagekit_domain::form::{Form, FormResponse};
use pagekit_domain::image::UploadedImage;
use pagekit_domain::job_application::JobApplication;
use pagekit_domain::quote::QuoteRequest;
use pagekit_domain::resource::Resource;

/// Application state shared across all axum handlers.
///
/// Generic over the [`Ports`] bundle to avoid dynamic dispatch.
/// `Clone` is implemented manually so the adapters themselves do not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<P: Ports> {
    /// Page section documents.
    pub sections: Arc<SectionService<P::Sections>>,
    /// Contact form submissions.
    pub contact_messages: Arc<CrudService<ContactMessage, P::ContactMessages>>,
    /// Job applications and their résumé files.
    pub job_applications: Arc<AttachmentService<JobApplication, P::JobApplications, P::Media>>,
    /// Uploaded images and their files.
    pub images: Arc<AttachmentService<UploadedImage, P::Images, P::Media>>,
    /// Form definitions.
    pub forms: Arc<CrudService<Form, P::Forms>>,
    /// Submitted form responses.
    pub form_responses: Arc<CrudService<FormResponse, P::FormResponses>>,
    /// Quote requests.
    pub quotes: Arc<CrudService<QuoteRequest, P::Quotes>>,
}

impl<P: Ports> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            sections: Arc::clone(&self.sections),
            contact_messages: Arc::clone(&self.contact_messages),
            job_applications: Arc::clone(&self.job_applications),
            images: Arc::clone(&self.images),
            forms: Arc::clone(&self.forms),
            form_responses: Arc::clone(&self.form_responses),
            quotes: Arc::clone(&self.quotes),
        }
    }
}

impl<P: Ports> AppState<P> {
    /// Create a new application state from service instances.
    pub fn new(
        sections: SectionService<P::Sections>,
        contact_messages: CrudService<ContactMessage, P::ContactMessages>,
        job_applications: AttachmentService<JobApplication, P::JobApplications, P::Media>,
        images: AttachmentService<UploadedImage, P::Images, P::Media>,
        forms: CrudService<Form, P::Forms>,
        form_responses: CrudService<FormResponse, P::FormResponses>,
        quotes: CrudService<QuoteRequest, P::Quotes>,
    ) -> Self {
        Self {
            sections: Arc::new(sections),
            contact_messages: Arc::new(contact_messages),
            job_applications: Arc::new(job_applications),
            images: Arc::new(images),
            forms: Arc::new(forms),
            form_responses: Arc::new(form_responses),
            quotes: Arc::new(quotes),
        }
    }
}

/// Access to the CRUD service of one record type, so the generic handlers
/// in [`crate::api::crud`] can be instantiated once per collection.
pub trait Provides<R: Resource>: Clone + Send + Sync + 'static {
    /// Repository backing the collection.
    type Repo: Repository<R> + Send + Sync + 'static;

    fn crud(&self) -> &CrudService<R, Self::Repo>;
}

macro_rules! provides {
    ($record:ty, $repo:ident, |$state:ident| $service:expr) => {
        impl<P: Ports> Provides<$record> for AppState<P> {
            type Repo = P::$repo;

            fn crud(&self) -> &CrudService<$record, Self::Repo> {
                let $state = self;
                $service
            }
        }
    };
}

provides!(ContactMessage, ContactMessages, |s| &s.contact_messages);
provides!(JobApplication, JobApplications, |s| s.job_applications.records());
provides!(UploadedImage, Images, |s| s.images.records());
provides!(Form, Forms, |s| &s.forms);
provides!(FormResponse, FormResponses, |s| &s.form_responses);
provides!(QuoteRequest, Quotes, |s| &s.quotes);
