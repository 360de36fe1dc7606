//! Trace record parsing and the lazy trace reader.
//!
//! A trace is a line-oriented text source with one access record per line:
//! `<K> <hexaddr>,<size>` where `K` is `L` (load), `S` (store), or `M`
//! (modify). The address may carry an optional `0x` prefix, and the kind
//! letter may be preceded by whitespace (valgrind emits data lines with a
//! leading space). The reader is lazy, finite, and forward-only: the
//! source is consumed once, top to bottom, and is not restartable.
//!
//! Lines that do not match the record shape (including valgrind `I`
//! instruction-fetch lines) are handled per [`MalformedLinePolicy`]: either
//! skipped, counted, and logged, or surfaced as the first error of the run.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::common::TraceError;
use crate::config::MalformedLinePolicy;

/// The kind of one memory access record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// A data load (`L`).
    Load,
    /// A data store (`S`).
    Store,
    /// A load followed by a store to the same address (`M`).
    Modify,
}

impl AccessKind {
    /// Maps a trace kind letter to its access kind. Case-sensitive.
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Returns the trace letter for this kind.
    pub fn letter(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Returns how many access-kind units this record contributes: Load and
    /// Store count 1, Modify counts 2 (its load leg plus its store leg).
    pub fn units(self) -> u64 {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One parsed trace record.
///
/// `size` is the byte count of the access. It is parsed and echoed but does
/// not affect the hit/miss outcome: the simulator checks only the block
/// containing the starting address, never whether the access crosses a
/// block boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    /// Load, Store, or Modify.
    pub kind: AccessKind,
    /// The accessed address.
    pub addr: u64,
    /// Byte count of the access (recorded, not simulated).
    pub size: u64,
}

impl AccessRecord {
    /// Parses one trace line into a record.
    ///
    /// Accepts leading whitespace before the kind letter and an optional
    /// `0x`/`0X` address prefix. Returns `None` for any line that does not
    /// match the `<K> <hexaddr>,<size>` shape, including an unrecognized or
    /// multi-character kind token.
    pub fn parse(line: &str) -> Option<Self> {
        let (kind_token, tail) = line.trim().split_once(char::is_whitespace)?;
        let mut kind_chars = kind_token.chars();
        let kind = AccessKind::from_letter(kind_chars.next()?)?;
        if kind_chars.next().is_some() {
            return None;
        }

        let (addr_text, size_text) = tail.trim_start().split_once(',')?;
        let addr_digits = addr_text
            .strip_prefix("0x")
            .or_else(|| addr_text.strip_prefix("0X"))
            .unwrap_or(addr_text);
        let addr = u64::from_str_radix(addr_digits, 16).ok()?;
        let size = size_text.trim_end().parse::<u64>().ok()?;

        Some(Self { kind, addr, size })
    }
}

impl fmt::Display for AccessRecord {
    /// Formats the record the way the trace writes it: `L 10,1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.addr, self.size)
    }
}

/// Lazy, forward-only reader producing [`AccessRecord`]s from a
/// line-oriented source.
///
/// Iteration yields `Result<AccessRecord, TraceError>`: read failures are
/// always errors; malformed lines are errors only under
/// [`MalformedLinePolicy::Strict`], and are otherwise counted in
/// [`lines_ignored`](Self::lines_ignored) and skipped.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    policy: MalformedLinePolicy,
    line_no: u64,
    ignored: u64,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] when the file cannot be opened; an
    /// unreadable source is fatal before any record is produced.
    pub fn open<P: AsRef<Path>>(path: P, policy: MalformedLinePolicy) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), policy))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an already-buffered source.
    pub fn new(reader: R, policy: MalformedLinePolicy) -> Self {
        Self {
            lines: reader.lines(),
            policy,
            line_no: 0,
            ignored: 0,
        }
    }

    /// Returns how many lines have been read so far.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Returns how many malformed lines have been skipped so far.
    ///
    /// Always zero under [`MalformedLinePolicy::Strict`].
    pub fn lines_ignored(&self) -> u64 {
        self.ignored
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(TraceError::Io(err))),
            };
            self.line_no += 1;

            if let Some(record) = AccessRecord::parse(&text) {
                return Some(Ok(record));
            }

            match self.policy {
                MalformedLinePolicy::Skip => {
                    self.ignored += 1;
                    warn!(
                        line = self.line_no,
                        text = text.trim_end(),
                        "skipping malformed trace line"
                    );
                }
                MalformedLinePolicy::Strict => {
                    return Some(Err(TraceError::MalformedRecord {
                        line: self.line_no,
                        text,
                    }));
                }
            }
        }
    }
}
