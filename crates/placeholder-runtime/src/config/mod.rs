//! Configuration module for the placeholder runtime.
//!
//! This module provides file- and environment-based configuration loading
//! and validation for logging and placeholder settings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config};
pub use schema::{
    ApiConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, PlaceholderConfig,
};
pub use validation::validate_config;
