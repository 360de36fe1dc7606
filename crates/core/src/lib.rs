//! Trace-driven cache simulator library.
//!
//! This crate implements a set-associative cache simulator that replays a
//! text trace of memory accesses and reports hit/miss/eviction counts. It
//! provides the following:
//! 1. **Geometry:** Validated cache shape (set bits, ways, block bits) and
//!    pure tag/set address decomposition.
//! 2. **Cache model:** Flat line storage with true-LRU replacement driven by
//!    a monotonic recency clock.
//! 3. **Trace:** A lazy, forward-only reader for valgrind-style access
//!    records with a configurable malformed-line policy.
//! 4. **Simulation:** A sequential replay driver composing reader, decoder,
//!    and cache into one pipeline.
//! 5. **Statistics:** Aggregated counters and a sectioned report.

/// Shared types (error taxonomy).
pub mod common;
/// Simulator configuration (defaults, policy enums, serde structures).
pub mod config;
/// Cache geometry, address decoding, and the cache model itself.
pub mod cache;
/// Trace record parsing and the lazy trace reader.
pub mod trace;
/// Sequential replay driver.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The cache model; construct with `Cache::new` from a validated geometry.
pub use crate::cache::Cache;
/// Validated cache shape; owns the tag/set address decomposition.
pub use crate::cache::geometry::CacheGeometry;
/// Aggregated replay statistics; produced by `sim::replay`.
pub use crate::stats::SimStats;
