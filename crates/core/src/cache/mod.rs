//! Set-associative cache model.
//!
//! This module implements the cache the trace is replayed against. The
//! model counts hits, misses, and evictions; it stores no data, models no
//! timing, and distinguishes no write policy. Replacement is true LRU,
//! driven by a monotonic access clock rather than wall-clock time, so
//! eviction order is a pure function of processing order.

/// Cache shape validation and tag/set address decomposition.
pub mod geometry;

use std::fmt;

use self::geometry::{CacheGeometry, DecodedAddr};
use crate::trace::{AccessKind, AccessRecord};

/// Cache line entry containing tag, validity, and recency state.
#[derive(Debug, Clone, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    last_used: u64,
}

/// What a single access-kind unit did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was already resident.
    Hit,
    /// The block was installed into an invalid line.
    Miss,
    /// The block displaced the least-recently-used line of a full set.
    MissEviction,
}

impl AccessOutcome {
    /// Returns `true` for a hit.
    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` for a miss, with or without an eviction.
    #[inline]
    pub fn is_miss(self) -> bool {
        !self.is_hit()
    }

    /// Returns `true` when the access displaced a resident block.
    #[inline]
    pub fn evicted(self) -> bool {
        matches!(self, Self::MissEviction)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::MissEviction => write!(f, "miss eviction"),
        }
    }
}

/// The outcome(s) of one access record.
///
/// Load and Store produce one outcome; Modify produces two (its load leg,
/// then its store leg).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcomes {
    first: AccessOutcome,
    second: Option<AccessOutcome>,
}

impl AccessOutcomes {
    /// Wraps the single outcome of a Load or Store.
    fn single(first: AccessOutcome) -> Self {
        Self {
            first,
            second: None,
        }
    }

    /// Wraps the load-then-store outcome pair of a Modify.
    fn pair(first: AccessOutcome, second: AccessOutcome) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    /// Returns the first (or only) outcome.
    #[inline]
    pub fn first(&self) -> AccessOutcome {
        self.first
    }

    /// Returns the second outcome, present only for Modify records.
    #[inline]
    pub fn second(&self) -> Option<AccessOutcome> {
        self.second
    }

    /// Iterates over the outcomes in order.
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> + '_ {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Hit/miss/eviction totals accumulated by a [`Cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not (with or without an eviction).
    pub misses: u64,
    /// Misses that displaced a resident block from a full set.
    pub evictions: u64,
}

/// Set-associative cache with true-LRU replacement.
///
/// Owns a flat arena of `num_sets * ways` lines allocated once at
/// construction and never resized; set `i` occupies the slice
/// `[i * ways, (i + 1) * ways)`. The recency clock increments exactly once
/// per successful recency update (hit or install), which gives every
/// resident line a distinct `last_used` value and makes victim selection a
/// strict total order.
#[derive(Debug)]
pub struct Cache {
    geometry: CacheGeometry,
    lines: Vec<CacheLine>,
    clock: u64,
    counters: CacheCounters,
}

impl Cache {
    /// Creates a cache from a validated geometry. All lines start invalid.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            lines: vec![CacheLine::default(); geometry.num_sets() * geometry.ways()],
            geometry,
            clock: 0,
            counters: CacheCounters::default(),
        }
    }

    /// Returns the geometry this cache was built from.
    #[inline]
    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    /// Returns the accumulated hit/miss/eviction totals.
    #[inline]
    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    /// Checks whether the block containing `addr` is resident.
    ///
    /// Read-only: no recency update, no counter changes.
    pub fn contains(&self, addr: u64) -> bool {
        let DecodedAddr { tag, set_index } = self.geometry.decode(addr);
        self.set_lines(set_index)
            .iter()
            .any(|line| line.valid && line.tag == tag)
    }

    /// Processes one access record, updating counters and recency state.
    ///
    /// Load and Store yield one outcome. Modify runs its load leg and then
    /// its store leg on the same address, yielding two outcomes; the store
    /// leg always hits because the load leg just installed (or refreshed)
    /// the block.
    pub fn access(&mut self, record: AccessRecord) -> AccessOutcomes {
        match record.kind {
            AccessKind::Load => AccessOutcomes::single(self.load(record.addr)),
            AccessKind::Store => AccessOutcomes::single(self.store(record.addr)),
            AccessKind::Modify => {
                let load = self.load(record.addr);
                let store = self.store(record.addr);
                AccessOutcomes::pair(load, store)
            }
        }
    }

    /// Load path: lookup, then install or evict on a miss.
    ///
    /// On a full set the victim is the line with the minimum `last_used`;
    /// the strict `<` comparison means the lowest-index line wins any tie.
    fn load(&mut self, addr: u64) -> AccessOutcome {
        let DecodedAddr { tag, set_index } = self.geometry.decode(addr);
        let base = set_index * self.geometry.ways();

        let mut first_invalid = None;
        let mut victim = base;
        let mut victim_last_used = u64::MAX;

        for idx in base..base + self.geometry.ways() {
            let line = &self.lines[idx];
            if line.valid && line.tag == tag {
                self.touch(idx);
                self.counters.hits += 1;
                return AccessOutcome::Hit;
            }
            if !line.valid {
                if first_invalid.is_none() {
                    first_invalid = Some(idx);
                }
            } else if line.last_used < victim_last_used {
                victim = idx;
                victim_last_used = line.last_used;
            }
        }

        self.counters.misses += 1;
        if let Some(idx) = first_invalid {
            self.lines[idx].valid = true;
            self.lines[idx].tag = tag;
            self.touch(idx);
            AccessOutcome::Miss
        } else {
            self.lines[victim].tag = tag;
            self.touch(victim);
            self.counters.evictions += 1;
            AccessOutcome::MissEviction
        }
    }

    /// Store path: lookup only; a store miss takes the load path, so it
    /// installs and evicts exactly like a load miss.
    fn store(&mut self, addr: u64) -> AccessOutcome {
        let DecodedAddr { tag, set_index } = self.geometry.decode(addr);
        let base = set_index * self.geometry.ways();

        for idx in base..base + self.geometry.ways() {
            let line = &self.lines[idx];
            if line.valid && line.tag == tag {
                self.touch(idx);
                self.counters.hits += 1;
                return AccessOutcome::Hit;
            }
        }

        self.load(addr)
    }

    /// Advances the clock and stamps a line as most recently used.
    #[inline]
    fn touch(&mut self, idx: usize) {
        self.clock += 1;
        self.lines[idx].last_used = self.clock;
    }

    /// Returns the lines of one set.
    #[inline]
    fn set_lines(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.geometry.ways();
        &self.lines[base..base + self.geometry.ways()]
    }
}
