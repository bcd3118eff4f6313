//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, HashingConfig, LogFormat, LoggingConfig, RegistrationConfig,
    ServerConfig, StorageBackend, StorageConfig,
};
