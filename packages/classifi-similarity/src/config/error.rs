//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid range for field '{field}': {value} not in {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// Score weights do not sum to 1
    #[error("Weights must sum to 1.0 (structuralWeight={structural} + semanticWeight={semantic} = {sum})")]
    WeightSum {
        structural: f64,
        semantic: f64,
        sum: f64,
    },

    /// Two individually valid fields conflict
    #[error("Inconsistent configuration: {issue}. Fix: {fix}")]
    Inconsistent { issue: String, fix: String },

    /// Unknown preset name
    #[error("Unknown preset '{0}'. Valid presets: lenient, balanced, strict")]
    UnknownPreset(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }
}
