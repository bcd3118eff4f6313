//! Registration errors

use thiserror::Error;

use super::validation::UserValidationError;
use crate::domain::DomainError;

/// Errors returned by the registration operation
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A required field is missing or empty
    #[error(transparent)]
    Validation(#[from] UserValidationError),

    /// The email is already taken by another record
    #[error("Email is already registered.")]
    DuplicateEmail,

    /// The store could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(#[source] DomainError),

    /// The password could not be hashed
    #[error("Password hashing failed: {0}")]
    Hashing(#[source] DomainError),
}

impl RegistrationError {
    /// Whether the caller sent bad input, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateEmail)
    }

    /// Short label used for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid",
            Self::DuplicateEmail => "duplicate_email",
            Self::Persistence(_) | Self::Hashing(_) => "error",
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        if err.is_conflict() {
            Self::DuplicateEmail
        } else {
            Self::Persistence(err)
        }
    }
}
