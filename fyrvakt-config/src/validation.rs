// fyrvakt-config/src/validation.rs
//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use std::collections::HashSet;

use validator::ValidationError;

/// Validate that a device identifier is non-empty and uses `[A-Za-z0-9_-]` only.
pub fn validate_device_id(id: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^[A-Za-z0-9_-]{1,64}$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_device_id"))
    }
}

/// Validate a `tracing` level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate log output format.
pub fn validate_log_format(format: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(pretty|json)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(format) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_format"))
    }
}

/// Validate the enabled analyzer list: names are non-blank and unique.
pub fn validate_analyzer_names(names: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::new("blank_analyzer_name"));
        }
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::new("duplicate_analyzer_name"));
        }
    }
    Ok(())
}

/// Validate that every simulated source is a usable device id.
pub fn validate_sources(sources: &[String]) -> Result<(), ValidationError> {
    sources.iter().try_for_each(|source| validate_device_id(source))
}
