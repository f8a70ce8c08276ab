//! Multi-course discount table.
//!
//! The discount rate is a step function of how many distinct courses are
//! selected:
//!
//! | Courses | Rate |
//! |---------|------|
//! | 0 or 1  | 0%   |
//! | 2       | 5%   |
//! | 3       | 10%  |
//! | 4+      | 15%  |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::DiscountSchedule;
//!
//! let schedule = DiscountSchedule::standard();
//!
//! assert_eq!(schedule.rate_for(1), dec!(0));
//! assert_eq!(schedule.rate_for(2), dec!(0.05));
//! assert_eq!(schedule.rate_for(3), dec!(0.10));
//! assert_eq!(schedule.rate_for(7), dec!(0.15));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a discount schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountScheduleError {
    /// A tier's rate must be in `[0, 1)`.
    #[error("discount rate must be at least 0 and below 1, got {0}")]
    InvalidRate(Decimal),

    /// Two tiers start at the same course count.
    #[error("more than one discount tier starts at {0} courses")]
    DuplicateTier(usize),
}

/// One step of the discount table: `rate` applies from `min_courses`
/// selected courses upward, until the next tier starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_courses: usize,
    pub rate: Decimal,
}

impl DiscountTier {
    pub fn new(
        min_courses: usize,
        rate: Decimal,
    ) -> Self {
        Self { min_courses, rate }
    }
}

/// Ordered set of [`DiscountTier`]s, sorted by `min_courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    tiers: Vec<DiscountTier>,
}

impl DiscountSchedule {
    /// Builds a schedule from tiers in any order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountScheduleError`] if:
    /// - a rate is negative or at least 1
    /// - two tiers share the same `min_courses`
    pub fn new(mut tiers: Vec<DiscountTier>) -> Result<Self, DiscountScheduleError> {
        if let Some(tier) = tiers
            .iter()
            .find(|t| t.rate < Decimal::ZERO || t.rate >= Decimal::ONE)
        {
            return Err(DiscountScheduleError::InvalidRate(tier.rate));
        }

        tiers.sort_by_key(|t| t.min_courses);
        if let Some(pair) = tiers
            .windows(2)
            .find(|pair| pair[0].min_courses == pair[1].min_courses)
        {
            return Err(DiscountScheduleError::DuplicateTier(pair[0].min_courses));
        }

        Ok(Self { tiers })
    }

    /// The standard multi-course discount table.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                DiscountTier::new(0, Decimal::ZERO),
                DiscountTier::new(2, Decimal::new(5, 2)),
                DiscountTier::new(3, Decimal::new(10, 2)),
                DiscountTier::new(4, Decimal::new(15, 2)),
            ],
        }
    }

    /// Rate of the highest tier whose `min_courses` does not exceed
    /// `course_count`, or zero if no tier applies.
    pub fn rate_for(
        &self,
        course_count: usize,
    ) -> Decimal {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.min_courses <= course_count)
            .map_or(Decimal::ZERO, |t| t.rate)
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
