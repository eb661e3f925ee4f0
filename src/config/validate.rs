//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    validate_timeline_rate(defaults.timeline_rate)?;

    if defaults.export_every == 0 {
        return Err(Error::ConfigValidation {
            message: "export_every must be at least 1".to_string(),
        });
    }

    validate_extension(&defaults.extension)?;

    if let Some(name) = &defaults.sheet_name
        && name.trim().is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "sheet_name must not be blank".to_string(),
        });
    }

    Ok(())
}

/// Timeline rate must be a finite positive number.
pub fn validate_timeline_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("timeline_rate must be a positive number, got {rate}"),
        });
    }
    Ok(())
}

/// Extension must be non-empty and given without the leading dot.
pub fn validate_extension(extension: &str) -> Result<()> {
    if extension.is_empty() {
        return Err(Error::ConfigValidation {
            message: "extension must not be empty".to_string(),
        });
    }
    if extension.starts_with('.') {
        return Err(Error::ConfigValidation {
            message: format!("extension must not start with '.', got '{extension}'"),
        });
    }
    Ok(())
}
