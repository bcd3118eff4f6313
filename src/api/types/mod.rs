//! HTTP request and response types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, SERVER_ERROR_MESSAGE};
pub use json::Json;
