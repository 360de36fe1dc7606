//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! replay. It provides:
//! 1. **Defaults:** Baseline cache shape and trace-handling constants.
//! 2. **Structures:** Hierarchical config for the cache geometry and the
//!    trace reader.
//! 3. **Enums:** The malformed-line policy.
//!
//! Configuration is supplied via JSON (`Config::from_json_str`) or built
//! from `Config::default()` and command-line overrides.

use serde::Deserialize;

use crate::cache::geometry::CacheGeometry;
use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache shape when not explicitly
/// overridden by a configuration file or command-line flags.
mod defaults {
    /// Default set-index bit width (32 sets).
    pub const SET_BITS: u32 = 5;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: usize = 1;

    /// Default block-offset bit width (32-byte blocks).
    pub const BLOCK_BITS: u32 = 5;
}

/// Policy for trace lines that do not match the record shape.
///
/// The reference behavior for such lines was a silent drop; here the policy
/// is explicit and the skipped count is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MalformedLinePolicy {
    /// Skip the line, count it as ignored, and log a warning.
    #[default]
    #[serde(alias = "skip")]
    Skip,
    /// Fail the whole run on the first malformed line.
    #[serde(alias = "strict")]
    Strict,
}

/// Root configuration structure for a replay.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachetrace_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.set_bits, 5);
/// assert_eq!(config.cache.ways, 1);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachetrace_core::config::{Config, MalformedLinePolicy};
///
/// let json = r#"{
///     "cache": { "set_bits": 4, "ways": 2, "block_bits": 4 },
///     "trace": { "malformed_lines": "Strict" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.trace.malformed_lines, MalformedLinePolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache shape configuration.
    #[serde(default)]
    pub cache: CacheShapeConfig,
    /// Trace reader configuration.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the JSON does not match the
    /// configuration schema.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Cache shape configuration.
///
/// The shape is validated when turned into a [`CacheGeometry`], not at
/// deserialization time, so command-line overrides can be applied first.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheShapeConfig {
    /// Set-index bit width; the number of sets is `2^set_bits`.
    #[serde(default = "CacheShapeConfig::default_set_bits")]
    pub set_bits: u32,

    /// Associativity (lines per set).
    #[serde(default = "CacheShapeConfig::default_ways")]
    pub ways: usize,

    /// Block-offset bit width.
    #[serde(default = "CacheShapeConfig::default_block_bits")]
    pub block_bits: u32,
}

impl CacheShapeConfig {
    /// Returns the default set-index bit width.
    fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default block-offset bit width.
    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Validates the shape into an immutable [`CacheGeometry`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`] for a zero associativity and
    /// [`ConfigError::AddressWidthExceeded`] when the set and block widths
    /// leave no room for a tag.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.set_bits, self.ways, self.block_bits)
    }
}

impl Default for CacheShapeConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            ways: defaults::WAYS,
            block_bits: defaults::BLOCK_BITS,
        }
    }
}

/// Trace reader configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceConfig {
    /// How to handle lines that do not match the record shape.
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,
}
