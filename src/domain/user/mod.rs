//! User domain
//!
//! This module provides domain types and traits for user registration,
//! including the user entity, the password digest value type, input
//! validation, and the repository trait.

mod digest;
mod entity;
mod error;
mod repository;
mod validation;

pub use digest::{DigestParseError, HashAlgorithm, HashCost, PasswordDigest, ARGON2_VERSION};
pub use entity::{NewUser, User, UserId};
pub use error::RegistrationError;
pub use repository::UserRepository;
pub use validation::{validate_required, EmailMatching, RequiredFields, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
