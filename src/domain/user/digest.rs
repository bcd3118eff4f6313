//! Password digest value type
//!
//! A digest carries everything needed to verify a candidate password later:
//! the algorithm, its version, the cost parameters and the salt, alongside the
//! hash output itself. The storage form is the PHC string encoding.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::PasswordHash;
use argon2::Params;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Argon2 version 0x13
pub const ARGON2_VERSION: u32 = 0x13;

/// Errors raised when decoding a stored digest
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DigestParseError {
    #[error("Malformed password digest: {0}")]
    Malformed(String),

    #[error("Unsupported hash algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("Invalid cost parameters: {0}")]
    InvalidCost(String),

    #[error("Password digest has no salt")]
    MissingSalt,

    #[error("Password digest has no hash output")]
    MissingHash,
}

/// Hash algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Argon2d,
    Argon2i,
    Argon2id,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Argon2d => "argon2d",
            Self::Argon2i => "argon2i",
            Self::Argon2id => "argon2id",
        }
    }

    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "argon2d" => Some(Self::Argon2d),
            "argon2i" => Some(Self::Argon2i),
            "argon2id" => Some(Self::Argon2id),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost factor of a hash - higher values make each hash slower to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Salted, irreversible password digest
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordDigest {
    algorithm: HashAlgorithm,
    version: u32,
    cost: HashCost,
    salt: String,
    hash: String,
}

impl PasswordDigest {
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// B64-encoded salt
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// B64-encoded hash output
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Encode as a PHC string
    pub fn to_phc_string(&self) -> String {
        self.to_string()
    }
}

impl FromStr for PasswordDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = PasswordHash::new(s).map_err(|e| DigestParseError::Malformed(e.to_string()))?;

        let algorithm = HashAlgorithm::from_ident(parsed.algorithm.as_str()).ok_or_else(|| {
            DigestParseError::UnsupportedAlgorithm(parsed.algorithm.as_str().to_string())
        })?;

        let params =
            Params::try_from(&parsed).map_err(|e| DigestParseError::InvalidCost(e.to_string()))?;

        let salt = parsed.salt.ok_or(DigestParseError::MissingSalt)?;
        let hash = parsed.hash.ok_or(DigestParseError::MissingHash)?;

        Ok(Self {
            algorithm,
            version: parsed.version.unwrap_or(ARGON2_VERSION),
            cost: HashCost {
                memory_kib: params.m_cost(),
                iterations: params.t_cost(),
                parallelism: params.p_cost(),
            },
            salt: salt.as_str().to_string(),
            hash: hash.to_string(),
        })
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.algorithm,
            self.version,
            self.cost.memory_kib,
            self.cost.iterations,
            self.cost.parallelism,
            self.salt,
            self.hash
        )
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl TryFrom<String> for PasswordDigest {
    type Error = DigestParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.to_string()
    }
}
