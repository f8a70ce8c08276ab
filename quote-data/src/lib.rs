//! CSV input for the quote tools: a catalogue override file and batches
//! of enrolment requests.

mod catalogue_loader;
mod enrolment_loader;

pub use catalogue_loader::{CatalogueLoader, CatalogueLoaderError, CourseRecord};
pub use enrolment_loader::{
    EnrolmentLoader, EnrolmentLoaderError, EnrolmentRecord, EnrolmentRequest,
};
