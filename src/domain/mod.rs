//! Domain layer - core registration types and traits

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{NewUser, PasswordDigest, RegistrationError, User, UserId, UserRepository};
