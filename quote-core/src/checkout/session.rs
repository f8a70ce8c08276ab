use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::{Quote, calculate_quote};
use crate::models::{Course, Selection};
use crate::validation::{CardDetails, ContactDetails, ValidationError, ValidationErrors};

/// Errors returned by [`CheckoutSession`] transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("No courses selected.")]
    EmptySelection,

    /// The selection can only change while reviewing.
    #[error("the selection cannot change once payment has started")]
    Locked,

    #[error("cannot {action} while {step:?}")]
    WrongStep {
        action: &'static str,
        step: CheckoutStep,
    },

    #[error(transparent)]
    Payment(#[from] ValidationError),

    #[error(transparent)]
    Contact(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckoutStep {
    #[default]
    Review,
    Payment,
    Confirmed,
}

/// Proof of a confirmed (simulated) payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub course_count: usize,
    pub total: Decimal,
}

/// A validated request for a consultant to follow up on a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantRequest {
    pub contact: ContactDetails,
    pub course_ids: Vec<String>,
    pub quote: Quote,
}

/// State of one checkout, from course review through payment.
///
/// The quote is recalculated whenever the selection changes, so
/// [`CheckoutSession::quote`] always matches [`CheckoutSession::selection`].
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    selection: Selection,
    quote: Quote,
    step: CheckoutStep,
}

impl CheckoutSession {
    pub fn new(selection: Selection) -> Self {
        let quote = calculate_quote(&selection);
        Self {
            selection,
            quote,
            step: CheckoutStep::Review,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Adds or removes `course`. Returns whether it is selected afterwards.
    pub fn toggle_course(
        &mut self,
        course: &Course,
    ) -> Result<bool, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::Locked);
        }
        let selected = self.selection.toggle(course);
        self.recalculate();
        Ok(selected)
    }

    /// Moves from review to the payment form.
    pub fn proceed_to_payment(&mut self) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Review, "proceed to payment")?;
        if self.selection.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        self.step = CheckoutStep::Payment;
        debug!(total = %self.quote.total, "checkout moved to payment");
        Ok(())
    }

    /// Leaves the payment form without paying.
    pub fn back_to_review(&mut self) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Payment, "return to review")?;
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// Checks the card form and marks the checkout as paid. Nothing is
    /// charged; the receipt only echoes the quoted total.
    pub fn confirm_payment(
        &mut self,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, CheckoutError> {
        self.require_step(CheckoutStep::Payment, "confirm payment")?;
        card.validate()?;

        self.step = CheckoutStep::Confirmed;
        info!(
            course_count = self.quote.course_count,
            total = %self.quote.total,
            "payment confirmed"
        );

        Ok(PaymentReceipt {
            course_count: self.quote.course_count,
            total: self.quote.total,
        })
    }

    /// Validates `contact` and packages it with the current quote.
    pub fn request_consultant(
        &self,
        contact: &ContactDetails,
    ) -> Result<ConsultantRequest, CheckoutError> {
        if self.step == CheckoutStep::Confirmed {
            return Err(CheckoutError::WrongStep {
                action: "request a consultant",
                step: self.step,
            });
        }
        if self.selection.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        contact.validate()?;

        info!(courses = self.selection.len(), "consultant requested");

        Ok(ConsultantRequest {
            contact: contact.clone(),
            course_ids: self.selection.ids(),
            quote: self.quote.clone(),
        })
    }

    fn require_step(
        &self,
        expected: CheckoutStep,
        action: &'static str,
    ) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                action,
                step: self.step,
            })
        }
    }

    fn recalculate(&mut self) {
        self.quote = calculate_quote(&self.selection);
    }
}
