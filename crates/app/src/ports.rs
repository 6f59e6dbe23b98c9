//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod media;
pub mod storage;

pub use media::{MediaStore, Upload};
pub use storage::{Repository, SectionRepository};

use pagekit_domain::contact_message::ContactMessage;
use pagekit_domain::form::{Form, FormResponse};
use pagekit_domain::image::UploadedImage;
use pagekit_domain::job_application::JobApplication;
use pagekit_domain::quote::QuoteRequest;

/// The full set of adapters an application instance is wired with.
///
/// Implemented once by the composition root (and by test fixtures) so that
/// services and handlers are generic over a single parameter instead of one
/// per repository.
pub trait Ports: Send + Sync + 'static {
    type Sections: SectionRepository + Send + Sync + 'static;
    type ContactMessages: Repository<ContactMessage> + Send + Sync + 'static;
    type JobApplications: Repository<JobApplication> + Send + Sync + 'static;
    type Images: Repository<UploadedImage> + Send + Sync + 'static;
    type Forms: Repository<Form> + Send + Sync + 'static;
    type FormResponses: Repository<FormResponse> + Send + Sync + 'static;
    type Quotes: Repository<QuoteRequest> + Send + Sync + 'static;
    type Media: MediaStore + Send + Sync + 'static;
}
