//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::digest::PasswordDigest;

/// User identifier, assigned by the store at insert time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record that has not been persisted yet
///
/// The password can only be supplied as a digest, so a plain-text password
/// has no way into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    name: String,
    email: String,
    password: PasswordDigest,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: PasswordDigest) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    /// Attach the identity and creation time assigned by the store
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            created_at,
        }
    }
}

/// Stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identity assigned by the store
    id: UserId,
    /// Display name
    name: String,
    /// Unique email address
    email: String,
    /// Password digest - never exposed in serialization
    #[serde(skip_serializing)]
    password: PasswordDigest,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
