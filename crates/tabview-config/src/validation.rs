//! Configuration validation.
//!
//! Collects every problem instead of stopping at the first one.

use crate::schema::TabviewConfig;
use tabview_common::logging::parse_directive;
use tabview_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TabviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range_f64(
        &mut errors,
        "view.scale_factor",
        config.view.scale_factor,
        0.5,
        4.0,
    );

    if let Some(ua) = &config.view.user_agent {
        if ua.trim().is_empty() {
            errors.push("view.user_agent must not be blank".to_string());
        }
    }

    if parse_directive(&config.logging.level).is_none() {
        errors.push(format!(
            "logging.level = {:?} is not a valid filter directive",
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
