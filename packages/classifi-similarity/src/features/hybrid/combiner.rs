//! Weighted combination of structural and semantic scores
//!
//! Pure and infallible once built: weights and threshold are checked when the
//! combiner is created, never per pair.

use crate::config::{ConfigError, ConfigResult, RunConfig, Validatable};
use crate::config::validation::check_unit_interval;
use serde::{Deserialize, Serialize};

/// Combined score of one pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridScore {
    pub hybrid_score: f64,
    pub is_flagged: bool,
}

/// Hybrid combiner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridCombiner {
    structural_weight: f64,
    semantic_weight: f64,
    flag_threshold: f64,
}

impl HybridCombiner {
    /// Build from a run config, rejecting it if invalid
    pub fn new(config: &RunConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            structural_weight: config.structural_weight,
            semantic_weight: config.semantic_weight,
            flag_threshold: config.flag_threshold,
        })
    }

    /// Build from explicit weights and threshold
    pub fn with_weights(structural: f64, semantic: f64, flag_threshold: f64) -> ConfigResult<Self> {
        check_unit_interval("structuralWeight", structural, "Weights are fractions.")?;
        check_unit_interval("semanticWeight", semantic, "Weights are fractions.")?;
        let sum = structural + semantic;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::WeightSum {
                structural,
                semantic,
                sum,
            });
        }
        check_unit_interval("flagThreshold", flag_threshold, "Thresholds are fractions.")?;
        Ok(Self {
            structural_weight: structural,
            semantic_weight: semantic,
            flag_threshold,
        })
    }

    pub fn flag_threshold(&self) -> f64 {
        self.flag_threshold
    }

    pub fn combine(&self, structural: f64, semantic: f64) -> HybridScore {
        let hybrid_score =
            clamp01(self.structural_weight * structural + self.semantic_weight * semantic);
        HybridScore {
            hybrid_score,
            is_flagged: self.is_flagged(hybrid_score),
        }
    }

    /// Flag decision, `hybrid_score >= flag_threshold`
    pub fn is_flagged(&self, hybrid_score: f64) -> bool {
        hybrid_score >= self.flag_threshold
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
