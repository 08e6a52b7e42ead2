//! Runtime configuration
//!
//! Configuration can be built in code, read from TOML, or taken from the
//! environment.
//!
//! ## TOML
//!
//! ```toml
//! entry_point = "Go"
//! max_depth = 10000
//! stack_size = 67108864
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REFAL_ENTRY` | `Go` | Name of the entry-point function |
//! | `REFAL_MAX_DEPTH` | `10000` | Maximum nesting of function calls |
//! | `REFAL_STACK_SIZE` | `67108864` | Stack size of the evaluation thread, in bytes |
//!
//! Invalid values (non-numeric, zero) are warned about and ignored.

use crate::error::{Result, RuntimeError};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Entry point name used by Refal-5 programs
pub const DEFAULT_ENTRY_POINT: &str = "Go";

/// Default call nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Default evaluation thread stack: 64MB (0x4000000 bytes)
/// Large enough for DEFAULT_MAX_DEPTH nested calls with room to spare.
pub const DEFAULT_STACK_SIZE: usize = 0x4000000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Function invoked once, with an empty term, by `Program::run`
    pub entry_point: String,

    /// Maximum nesting of function calls before `RecursionLimit` is raised
    pub max_depth: usize,

    /// Stack size in bytes of the thread `Program::run` evaluates on
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig::default()
    }

    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: RuntimeConfig = toml::from_str(toml_str)
            .map_err(|e| RuntimeError::Config(format!("Failed to parse runtime config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Defaults overridden by `REFAL_*` environment variables
    pub fn from_env() -> Self {
        let defaults = RuntimeConfig::default();

        let entry_point = std::env::var("REFAL_ENTRY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.entry_point);

        RuntimeConfig {
            entry_point,
            max_depth: parse_positive(
                "REFAL_MAX_DEPTH",
                std::env::var("REFAL_MAX_DEPTH").ok(),
                defaults.max_depth,
            ),
            stack_size: parse_positive(
                "REFAL_STACK_SIZE",
                std::env::var("REFAL_STACK_SIZE").ok(),
                defaults.stack_size,
            ),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.entry_point.trim().is_empty() {
            return Err(RuntimeError::Config(
                "entry_point cannot be empty".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(RuntimeError::Config("max_depth must be positive".to_string()));
        }
        if self.stack_size == 0 {
            return Err(RuntimeError::Config(
                "stack_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a positive integer from an optional string value.
/// Returns `default` if the value is missing, zero, or invalid.
fn parse_positive(var: &str, value: Option<String>, default: usize) -> usize {
    match value {
        Some(val) => match val.trim().parse::<usize>() {
            Ok(0) => {
                warn!("{}=0 is invalid, using default {}", var, default);
                default
            }
            Ok(n) => n,
            Err(_) => {
                warn!(
                    "{}='{}' is not a valid number, using default {}",
                    var, val, default
                );
                default
            }
        },
        None => default,
    }
}
