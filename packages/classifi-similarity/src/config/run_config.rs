//! Run-level configuration
//!
//! One `RunConfig` governs a single analysis run. It is validated once, before
//! tokenization starts; a config that fails validation never reaches a worker.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::{check_unit_interval, check_usize, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Allowed slack when checking that the weights sum to 1
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

pub const DEFAULT_K_GRAM_SIZE: usize = 5;
pub const DEFAULT_WINNOW_WINDOW_SIZE: usize = 4;
pub const DEFAULT_MIN_FRAGMENT_LENGTH: usize = DEFAULT_K_GRAM_SIZE + DEFAULT_WINNOW_WINDOW_SIZE - 1;
pub const DEFAULT_FLAG_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MAX_FILE_BYTES: usize = 512 * 1024;
pub const DEFAULT_TEMPLATE_MIN_MATCH: usize = 5;

/// Configuration of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RunConfig {
    /// Tokens per k-gram
    pub k_gram_size: usize,

    /// Consecutive k-gram hashes per winnowing window
    pub winnow_window_size: usize,

    /// Shortest fragment (in tokens) kept as evidence
    ///
    /// Must be at least `k_gram_size + winnow_window_size - 1`, the length from
    /// which winnowing guarantees detection.
    pub min_fragment_length: usize,

    /// Weight of the structural score in the hybrid score
    pub structural_weight: f64,

    /// Weight of the semantic score in the hybrid score
    pub semantic_weight: f64,

    /// Pairs with `hybrid_score >= flag_threshold` are flagged
    pub flag_threshold: f64,

    /// Files larger than this are rejected with `FileTooLarge`
    pub max_file_bytes: usize,

    /// Shortest run of template tokens stripped from a submission
    pub template_min_match: usize,

    /// Worker threads for the run (0 = one per CPU)
    pub worker_threads: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            k_gram_size: DEFAULT_K_GRAM_SIZE,
            winnow_window_size: DEFAULT_WINNOW_WINDOW_SIZE,
            min_fragment_length: DEFAULT_MIN_FRAGMENT_LENGTH,
            structural_weight: 0.5,
            semantic_weight: 0.5,
            flag_threshold: DEFAULT_FLAG_THRESHOLD,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            template_min_match: DEFAULT_TEMPLATE_MIN_MATCH,
            worker_threads: 0,
        }
    }
}

impl RunConfig {
    /// Complete configuration for a preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Lenient => Self {
                k_gram_size: 7,
                winnow_window_size: 6,
                min_fragment_length: 12,
                structural_weight: 0.6,
                semantic_weight: 0.4,
                flag_threshold: 0.7,
                ..Self::default()
            },
            Preset::Balanced => Self::default(),
            Preset::Strict => Self {
                k_gram_size: 4,
                winnow_window_size: 3,
                min_fragment_length: 6,
                flag_threshold: 0.4,
                ..Self::default()
            },
        }
    }

    /// Override the hybrid weights
    pub fn with_weights(mut self, structural: f64, semantic: f64) -> Self {
        self.structural_weight = structural;
        self.semantic_weight = semantic;
        self
    }

    /// Override the flag threshold
    pub fn with_flag_threshold(mut self, threshold: f64) -> Self {
        self.flag_threshold = threshold;
        self
    }

    /// Override the worker thread count
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Shortest shared run guaranteed to produce a common fingerprint
    pub fn guaranteed_match_length(&self) -> usize {
        self.k_gram_size + self.winnow_window_size.saturating_sub(1)
    }

    /// Worker threads after resolving `0` to the CPU count
    pub fn effective_worker_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.worker_threads
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Validatable for RunConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_usize(
            "kGramSize",
            self.k_gram_size,
            1,
            64,
            "Short files need a small k; 5 works well for classroom code.",
        )?;
        check_usize(
            "winnowWindowSize",
            self.winnow_window_size,
            1,
            256,
            "A window of 1 keeps every k-gram hash.",
        )?;

        let guaranteed = self.guaranteed_match_length();
        if self.min_fragment_length < guaranteed {
            return Err(ConfigError::Inconsistent {
                issue: format!(
                    "minFragmentLength {} is below kGramSize + winnowWindowSize - 1 = {}",
                    self.min_fragment_length, guaranteed
                ),
                fix: format!("set minFragmentLength >= {}", guaranteed),
            });
        }

        check_unit_interval("structuralWeight", self.structural_weight, "Weights are fractions.")?;
        check_unit_interval("semanticWeight", self.semantic_weight, "Weights are fractions.")?;
        let sum = self.structural_weight + self.semantic_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSum {
                structural: self.structural_weight,
                semantic: self.semantic_weight,
                sum,
            });
        }

        check_unit_interval(
            "flagThreshold",
            self.flag_threshold,
            "The threshold is compared against hybrid scores in [0, 1].",
        )?;
        check_usize(
            "maxFileBytes",
            self.max_file_bytes,
            1,
            usize::MAX,
            "Use a positive byte limit.",
        )?;
        check_usize(
            "templateMinMatch",
            self.template_min_match,
            1,
            usize::MAX,
            "Use a positive token count.",
        )?;

        Ok(())
    }
}
