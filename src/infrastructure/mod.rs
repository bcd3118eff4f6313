//! Infrastructure layer - hashing, persistence, logging and metrics

pub mod logging;
pub mod observability;
pub mod user;
