//! Registration input validation

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    /// One or more required fields are absent or empty
    #[error("All fields are required.")]
    MissingFields(Vec<&'static str>),
}

impl UserValidationError {
    /// Names of the fields that failed the presence check
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}

/// How two email addresses are compared for uniqueness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmailMatching {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Unicode lower-case folding before comparison and storage
    CaseInsensitive,
}

impl EmailMatching {
    /// Normalize an email into the form used for lookup and storage
    pub fn normalize(&self, email: &str) -> String {
        match self {
            Self::Exact => email.to_string(),
            Self::CaseInsensitive => email.to_lowercase(),
        }
    }
}

/// Validated registration fields
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Check that name, email and password are all present
///
/// `None` and the empty string count as missing. No further format
/// constraints are applied.
pub fn validate_required<'a>(
    name: Option<&'a str>,
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<RequiredFields<'a>, UserValidationError> {
    let mut missing = Vec::new();

    let name = present("name", name, &mut missing);
    let email = present("email", email, &mut missing);
    let password = present("password", password, &mut missing);

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) => Ok(RequiredFields {
            name,
            email,
            password,
        }),
        _ => Err(UserValidationError::MissingFields(missing)),
    }
}

fn present<'a>(
    field: &'static str,
    value: Option<&'a str>,
    missing: &mut Vec<&'static str>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}
