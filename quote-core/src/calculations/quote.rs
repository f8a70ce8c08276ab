//! Quote calculation for a course selection.
//!
//! A quote is recomputed from scratch every time the selection changes:
//!
//! | Field            | Definition                              |
//! |------------------|-----------------------------------------|
//! | `subtotal`       | Sum of course fees                      |
//! | `discount_rate`  | Step function of the course count       |
//! | `discount`       | `subtotal × discount_rate` (unrounded)  |
//! | `after_discount` | `subtotal − discount`                   |
//! | `vat`            | `after_discount × 15%`                  |
//! | `total`          | `after_discount + vat`                  |
//!
//! No rounding is applied; callers round when rendering.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{Catalogue, Selection};
//! use quote_core::calculations::calculate_quote;
//!
//! let catalogue = Catalogue::standard();
//! let selection = Selection::from_ids(catalogue, ["first-aid", "sewing", "child-minding"]).unwrap();
//!
//! let quote = calculate_quote(&selection);
//!
//! assert_eq!(quote.subtotal, dec!(3750));
//! assert_eq!(quote.discount, dec!(375));
//! assert_eq!(quote.vat, dec!(506.25));
//! assert_eq!(quote.total, dec!(3881.25));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::max;
use crate::calculations::discount::DiscountSchedule;
use crate::catalogue::max_fee;
use crate::models::Selection;

/// The VAT rate applied to the discounted subtotal (15%).
pub fn standard_vat_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Errors that can occur when configuring a [`QuoteCalculator`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteCalculatorError {
    /// The VAT rate must be between 0 and 1.
    #[error("VAT rate must be between 0 and 1, got {0}")]
    InvalidVatRate(Decimal),
}

/// Price breakdown for a selection, at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Number of distinct courses priced.
    pub course_count: usize,

    /// Sum of the selected course fees.
    pub subtotal: Decimal,

    /// Fraction of the subtotal taken off, e.g. `0.10`.
    pub discount_rate: Decimal,

    /// Amount taken off the subtotal.
    pub discount: Decimal,

    /// Subtotal minus discount.
    pub after_discount: Decimal,

    /// VAT rate used, e.g. `0.15`.
    pub vat_rate: Decimal,

    /// VAT charged on the discounted amount.
    pub vat: Decimal,

    /// Amount payable.
    pub total: Decimal,
}

impl Quote {
    /// Quote for an empty selection.
    pub fn zero() -> Self {
        Self {
            course_count: 0,
            subtotal: Decimal::ZERO,
            discount_rate: Decimal::ZERO,
            discount: Decimal::ZERO,
            after_discount: Decimal::ZERO,
            vat_rate: standard_vat_rate(),
            vat: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Discount rate as a whole percentage for labels (`0.10` -> `10`).
    pub fn discount_percent(&self) -> Decimal {
        (self.discount_rate * Decimal::from(100)).normalize()
    }

    /// VAT rate as a whole percentage for labels (`0.15` -> `15`).
    pub fn vat_percent(&self) -> Decimal {
        (self.vat_rate * Decimal::from(100)).normalize()
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::zero()
    }
}

/// Calculator that prices a [`Selection`] against a discount schedule.
///
/// Calculation never fails: it is defined for every selection, including
/// an empty one.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<'a> {
    schedule: &'a DiscountSchedule,
    vat_rate: Decimal,
}

impl<'a> QuoteCalculator<'a> {
    /// Creates a calculator using `schedule` and the standard 15% VAT rate.
    pub fn new(schedule: &'a DiscountSchedule) -> Self {
        Self {
            schedule,
            vat_rate: standard_vat_rate(),
        }
    }

    /// Overrides the VAT rate.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteCalculatorError::InvalidVatRate`] if `vat_rate` is
    /// outside `[0, 1]`.
    pub fn with_vat_rate(
        mut self,
        vat_rate: Decimal,
    ) -> Result<Self, QuoteCalculatorError> {
        if vat_rate < Decimal::ZERO || vat_rate > Decimal::ONE {
            return Err(QuoteCalculatorError::InvalidVatRate(vat_rate));
        }
        self.vat_rate = vat_rate;
        Ok(self)
    }

    /// Calculates the full breakdown for `selection`.
    pub fn calculate(
        &self,
        selection: &Selection,
    ) -> Quote {
        let course_count = selection.len();
        let subtotal = self.subtotal(selection);
        let discount_rate = self.schedule.rate_for(course_count);
        let discount = self.discount(subtotal, discount_rate);
        let after_discount = subtotal - discount;
        let vat = self.vat(after_discount);
        let total = after_discount + vat;

        debug!(
            course_count,
            %subtotal,
            %discount_rate,
            %total,
            "quote calculated"
        );

        Quote {
            course_count,
            subtotal,
            discount_rate,
            discount,
            after_discount,
            vat_rate: self.vat_rate,
            vat,
            total,
        }
    }

    /// Sums course fees. A negative fee counts as zero and a fee above
    /// [`max_fee`] counts as `max_fee`, so the sums below cannot overflow.
    fn subtotal(
        &self,
        selection: &Selection,
    ) -> Decimal {
        selection
            .iter()
            .map(|course| max(course.fee, Decimal::ZERO).min(max_fee()))
            .sum()
    }

    fn discount(
        &self,
        subtotal: Decimal,
        rate: Decimal,
    ) -> Decimal {
        subtotal * rate
    }

    fn vat(
        &self,
        after_discount: Decimal,
    ) -> Decimal {
        after_discount * self.vat_rate
    }
}

/// Prices `selection` with the standard discount schedule and VAT rate.
pub fn calculate_quote(selection: &Selection) -> Quote {
    let schedule = DiscountSchedule::standard();
    QuoteCalculator::new(&schedule).calculate(selection)
}
