//! Configuration validation

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
///
/// # Example
/// ```
/// use classifi_similarity::config::{RunConfig, Validatable};
///
/// let config = RunConfig::default();
/// assert!(config.validate().is_ok());
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}

/// Check an integer field against an inclusive range
pub(crate) fn check_usize(
    field: &str,
    value: usize,
    min: usize,
    max: usize,
    hint: &str,
) -> ConfigResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::range_with_hint(field, value, min, max, hint))
    }
}

/// Check a float field against `[0.0, 1.0]`, rejecting NaN
pub(crate) fn check_unit_interval(field: &str, value: f64, hint: &str) -> ConfigResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::range_with_hint(field, value, 0.0, 1.0, hint))
    }
}
