//! Input checks that gate the consultant-request, payment, contact and
//! login actions.
//!
//! These are shape checks only: nothing is normalised and nothing is
//! verified against an external service.

mod contact;
mod forms;

pub use contact::{is_valid_email, is_valid_phone};
pub use forms::{CardDetails, ContactDetails, ContactMessage, LoginForm, ValidationError, ValidationErrors};
