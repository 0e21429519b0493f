//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.
//! Operators are expected to start from one and tune per assignment.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Long k-grams, high threshold: only blatant copies are flagged
    ///
    /// - k=7, w=6, min fragment 12
    /// - weights 0.6 structural / 0.4 semantic
    /// - threshold 0.7
    Lenient,

    /// Default analysis
    ///
    /// - k=5, w=4, min fragment 8
    /// - equal weights
    /// - threshold 0.5
    Balanced,

    /// Short k-grams, low threshold: surfaces partial copies for review
    ///
    /// - k=4, w=3, min fragment 6
    /// - equal weights
    /// - threshold 0.4
    Strict,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Balanced => "balanced",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "balanced" => Ok(Self::Balanced),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}
