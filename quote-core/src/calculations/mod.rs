//! Price calculations for a course selection.
//!
//! [`discount`] holds the step table that maps the number of selected
//! courses to a discount rate; [`quote`] turns a selection into a full
//! breakdown (subtotal, discount, VAT and total).

pub mod common;
pub mod discount;
pub mod quote;

pub use discount::{DiscountSchedule, DiscountScheduleError, DiscountTier};
pub use quote::{Quote, QuoteCalculator, QuoteCalculatorError, calculate_quote, standard_vat_rate};
