//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

use crate::domain::user::{HashAlgorithm, HashCost, PasswordDigest};
use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError>;

    /// Verify a password against a digest
    ///
    /// The salt and cost are taken from the digest itself.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;

    /// Whether a digest was produced with other settings than the current ones
    fn needs_rehash(&self, digest: &PasswordDigest) -> bool;
}

/// Argon2id password hasher with a configurable cost
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    cost: HashCost,
    params: Params,
}

impl Argon2Hasher {
    /// Create a new Argon2 hasher with the default cost
    pub fn new() -> Self {
        Self {
            cost: HashCost::default(),
            params: Params::default(),
        }
    }

    /// Create a hasher with an explicit cost
    pub fn with_cost(cost: HashCost) -> Result<Self, DomainError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| DomainError::configuration(format!("Invalid hashing cost: {}", e)))?;

        Ok(Self { cost, params })
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let encoded = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        encoded
            .parse::<PasswordDigest>()
            .map_err(|e| DomainError::internal(format!("Failed to encode password digest: {}", e)))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let encoded = digest.to_phc_string();

        let parsed_hash = match PasswordHash::new(&encoded) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // The hash output comparison inside verify_password is constant-time
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn needs_rehash(&self, digest: &PasswordDigest) -> bool {
        digest.algorithm() != HashAlgorithm::Argon2id || digest.cost() != self.cost
    }
}
