use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::contact::{is_valid_email, is_valid_phone};

/// A single reason a form cannot be submitted. The messages are the notices
/// shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),

    #[error("Please fill in all card details.")]
    IncompleteCardDetails,

    #[error("Please fill in all fields before sending your message.")]
    IncompleteMessage,

    #[error("Please enter a username and password.")]
    IncompleteLogin,
}

/// Every problem found on a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(
        &mut self,
        error: ValidationError,
    ) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn contains(
        &self,
        error: &ValidationError,
    ) -> bool {
        self.0.contains(error)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Contact details attached to a consultant request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDetails {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks that every field is present and that email and phone have a
    /// plausible shape. All failures are reported together.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if is_blank(&self.name) {
            errors.push(ValidationError::MissingField { field: "Name" });
        }

        if is_blank(&self.email) {
            errors.push(ValidationError::MissingField { field: "Email" });
        } else if !is_valid_email(&self.email) {
            errors.push(ValidationError::InvalidEmail(self.email.clone()));
        }

        if is_blank(&self.phone) {
            errors.push(ValidationError::MissingField { field: "Phone" });
        } else if !is_valid_phone(&self.phone) {
            errors.push(ValidationError::InvalidPhone(self.phone.clone()));
        }

        errors.into_result()
    }
}

/// The payment form. Only presence is checked; no card data is verified
/// or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub name_on_card: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            &self.name_on_card,
            &self.card_number,
            &self.expiry,
            &self.cvv,
        ];
        if fields.iter().any(|f| is_blank(f)) {
            return Err(ValidationError::IncompleteCardDetails);
        }
        Ok(())
    }
}

/// A free-text message sent from the contact screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) || is_blank(&self.message) {
            return Err(ValidationError::IncompleteMessage);
        }
        Ok(())
    }
}

/// Login placeholder. There is no credential check: the form can be
/// submitted as soon as both fields hold something.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        !is_blank(&self.username) && !is_blank(&self.password)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.can_submit() {
            Ok(())
        } else {
            Err(ValidationError::IncompleteLogin)
        }
    }

    /// Name used in the home-screen greeting; `"user"` when blank.
    pub fn display_name(&self) -> &str {
        let name = self.username.trim();
        if name.is_empty() { "user" } else { name }
    }
}
