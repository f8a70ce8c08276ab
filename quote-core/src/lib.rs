//! Course catalogue, quote arithmetic and form validation for the
//! SSIK Nova "Empowering the Nation" training app.

pub mod calculations;
pub mod catalogue;
pub mod checkout;
pub mod models;
pub mod validation;

pub use calculations::{Quote, QuoteCalculator, calculate_quote};
pub use catalogue::{Catalogue, CatalogueError};
pub use checkout::{CheckoutError, CheckoutSession, CheckoutStep};
pub use models::*;
pub use validation::{ContactDetails, ValidationError, ValidationErrors};
