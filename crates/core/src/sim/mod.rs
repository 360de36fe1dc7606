//! Sequential replay driver.
//!
//! Composes the straight pipeline the simulator is built around: trace
//! reader, address decoder, cache model, aggregate counters. Replay is
//! strictly sequential in file order; LRU eviction decisions are defined by
//! processing order, so there is nothing here to parallelize.

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use crate::cache::{AccessOutcomes, Cache};
use crate::common::{SimError, TraceError};
use crate::config::Config;
use crate::stats::SimStats;
use crate::trace::{AccessKind, AccessRecord, TraceReader};

/// Trace-level totals produced by one [`replay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records processed (one per well-formed line).
    pub records: u64,
    /// Load records processed.
    pub loads: u64,
    /// Store records processed.
    pub stores: u64,
    /// Modify records processed.
    pub modifies: u64,
    /// Total lines read from the source, well-formed or not.
    pub lines_read: u64,
    /// Malformed lines skipped under the skip policy.
    pub lines_ignored: u64,
}

impl ReplaySummary {
    /// Records one processed access in the per-kind totals.
    fn note(&mut self, record: AccessRecord) {
        self.records += 1;
        match record.kind {
            AccessKind::Load => self.loads += 1,
            AccessKind::Store => self.stores += 1,
            AccessKind::Modify => self.modifies += 1,
        }
    }
}

/// Replays a trace through a cache, one record at a time in source order.
///
/// `on_event` is invoked once per processed record with its outcome(s);
/// pass a no-op closure when per-record reporting is not wanted.
///
/// # Errors
///
/// Returns [`TraceError::Io`] when the source fails mid-read, and
/// [`TraceError::MalformedRecord`] for a bad line under the strict policy.
/// No counters are lost on error; the cache keeps everything accumulated up
/// to the failing line.
pub fn replay<R, F>(
    cache: &mut Cache,
    mut reader: TraceReader<R>,
    mut on_event: F,
) -> Result<ReplaySummary, TraceError>
where
    R: BufRead,
    F: FnMut(AccessRecord, AccessOutcomes),
{
    let mut summary = ReplaySummary::default();

    for item in &mut reader {
        let record = item?;
        let outcomes = cache.access(record);
        summary.note(record);
        on_event(record, outcomes);
    }

    summary.lines_read = reader.lines_read();
    summary.lines_ignored = reader.lines_ignored();
    Ok(summary)
}

/// Runs one full simulation: validate the configuration, open the trace
/// file, replay it, and aggregate the statistics.
///
/// # Errors
///
/// Returns [`SimError::Config`] for an invalid cache shape and
/// [`SimError::Trace`] for an unreadable source or (under the strict
/// policy) a malformed line. On error no statistics are produced.
pub fn run<P, F>(config: &Config, trace_path: P, on_event: F) -> Result<SimStats, SimError>
where
    P: AsRef<Path>,
    F: FnMut(AccessRecord, AccessOutcomes),
{
    let geometry = config.cache.geometry()?;
    let mut cache = Cache::new(geometry);
    let reader = TraceReader::open(trace_path, config.trace.malformed_lines)?;

    let started = Instant::now();
    let summary = replay(&mut cache, reader, on_event)?;

    Ok(SimStats::from_parts(
        cache.counters(),
        summary,
        started.elapsed().as_secs_f64(),
    ))
}
