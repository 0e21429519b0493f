//! Run configuration
//!
//! - `RunConfig`: every tunable of one analysis run, with defaults
//! - `Preset`: named starting points (lenient / balanced / strict)
//! - `Validatable`: fail-fast validation before any pairwise work

pub mod error;
pub mod preset;
pub mod run_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use run_config::RunConfig;
pub use validation::Validatable;
