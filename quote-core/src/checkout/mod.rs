//! The checkout flow: review the selection, enter payment details, confirm.
//!
//! A consultant can be requested at any point before payment is confirmed.

mod session;

pub use session::{
    CheckoutError, CheckoutSession, CheckoutStep, ConsultantRequest, PaymentReceipt,
};
