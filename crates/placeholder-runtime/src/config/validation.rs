//! Configuration validation utilities.

use placeholder_core::{PlaceholderError, PlaceholderName};

use super::error::{ConfigError, ConfigResult};
use super::schema::{ApiConfig, LogFormat, LogOutput, LoggingConfig, PlaceholderConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ApiConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_placeholder_config(&config.placeholders)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.format == LogFormat::Json && !cfg!(feature = "json-log") {
        return Err(ConfigError::validation(
            "JSON log format requires the `json-log` feature",
        ));
    }

    if let Some(module) = logging.filters.keys().find(|m| m.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "Log filter target cannot be blank: '{module}'"
        )));
    }

    Ok(())
}

/// Validates placeholder settings.
fn validate_placeholder_config(placeholders: &PlaceholderConfig) -> ConfigResult<()> {
    for name in placeholders.static_placeholders.keys() {
        PlaceholderName::new(name).map_err(|err| ConfigError::InvalidPlaceholderName {
            name: name.clone(),
            reason: match err {
                PlaceholderError::InvalidArgument { reason } => reason,
                other => other.to_string(),
            },
        })?;
    }
    Ok(())
}
