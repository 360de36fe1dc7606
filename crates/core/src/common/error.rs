//! Error definitions for the cache simulator.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Invalid cache shapes and malformed
//!    configuration input, surfaced before any trace is read.
//! 2. **Trace Errors:** Unreadable sources and malformed records.
//! 3. **Umbrella Error:** A single conversion target for callers that
//!    drive a whole run.
//!
//! Nothing here is retried: the simulator is an offline batch replay over a
//! finite input, so every error is terminal for the run.

use thiserror::Error;

/// A fatal configuration error, detected before any trace processing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The associativity was zero; every set needs at least one line.
    #[error("associativity must be at least 1 (got 0 ways)")]
    ZeroWays,

    /// The set-index and block-offset widths together exceed the 64-bit
    /// address width, leaving no room for a tag.
    #[error(
        "set bits ({set_bits}) + block bits ({block_bits}) must be below the 64-bit address width"
    )]
    AddressWidthExceeded {
        /// Requested set-index bit width.
        set_bits: u32,
        /// Requested block-offset bit width.
        block_bits: u32,
    },

    /// The JSON configuration could not be deserialized.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An error produced while reading or parsing the access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be opened or read.
    #[error("failed to read trace source: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not match the `<K> <hexaddr>,<size>` record shape.
    ///
    /// Only surfaced under the strict malformed-line policy; the skip
    /// policy counts the line as ignored instead.
    #[error("malformed trace record at line {line}: {text:?}")]
    MalformedRecord {
        /// 1-based line number within the source.
        line: u64,
        /// The offending line, as read.
        text: String,
    },
}

/// Umbrella error for a full simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The run failed before replay started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run failed while reading the trace.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
