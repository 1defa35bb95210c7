//! Record/replay wrapper around [`DeterministicRandom`].
//!
//! In record mode every outcome-relevant draw is appended to one of three
//! positional streams. In replay mode the same calls pop those values back in
//! order, so a recorded run can be re-executed draw for draw. Byte fills are
//! entropy only and always go straight to the underlying source.

use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{ReplayStream, SimError};
use crate::rng::{DeterministicRandom, RandomSource};

/// One recorded `next_range(min, max)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRangeEntry {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

/// Persistent form of a recorded run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayLog {
    pub seed: u64,
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
    pub int_ranges: Vec<IntRangeEntry>,
}

impl ReplayLog {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Total number of recorded draws across all streams.
    pub fn draw_count(&self) -> usize {
        self.doubles.len() + self.ints.len() + self.int_ranges.len()
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a whole log. Any malformed content fails the load.
    pub fn from_json(s: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    doubles: usize,
    ints: usize,
    ranges: usize,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Record,
    Replay(Cursor),
}

/// A [`RandomSource`] that either records or replays every draw.
#[derive(Debug, Clone)]
pub struct ReplayRandom {
    inner: DeterministicRandom,
    log: ReplayLog,
    mode: Mode,
}

impl ReplayRandom {
    /// Draws from a fresh seeded source and records every value.
    pub fn record(seed: u64) -> Self {
        Self {
            inner: DeterministicRandom::from_seed(seed),
            log: ReplayLog::new(seed),
            mode: Mode::Record,
        }
    }

    /// Serves values back from `log` in recorded order.
    pub fn replay(log: ReplayLog) -> Self {
        Self {
            inner: DeterministicRandom::from_seed(log.seed),
            log,
            mode: Mode::Replay(Cursor::default()),
        }
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.mode, Mode::Replay(_))
    }

    pub fn log(&self) -> &ReplayLog {
        &self.log
    }

    pub fn into_log(self) -> ReplayLog {
        self.log
    }

    /// Unconsumed `(doubles, ints, int_ranges)` while replaying; zeros when recording.
    pub fn remaining(&self) -> (usize, usize, usize) {
        match self.mode {
            Mode::Record => (0, 0, 0),
            Mode::Replay(c) => (
                self.log.doubles.len() - c.doubles,
                self.log.ints.len() - c.ints,
                self.log.int_ranges.len() - c.ranges,
            ),
        }
    }

    pub fn is_fully_consumed(&self) -> bool {
        self.remaining() == (0, 0, 0)
    }
}

fn pop<T: Copy>(values: &[T], at: &mut usize, stream: ReplayStream) -> Result<T, SimError> {
    let v = *values.get(*at).ok_or(SimError::ReplayExhausted { stream })?;
    *at += 1;
    Ok(v)
}

impl RandomSource for ReplayRandom {
    fn next_double(&mut self) -> Result<f64, SimError> {
        match self.mode {
            Mode::Record => {
                let v = self.inner.next_double()?;
                self.log.doubles.push(v);
                Ok(v)
            }
            Mode::Replay(ref mut c) => {
                pop(&self.log.doubles, &mut c.doubles, ReplayStream::Doubles)
            }
        }
    }

    fn next_int(&mut self) -> Result<i32, SimError> {
        match self.mode {
            Mode::Record => {
                let v = self.inner.next_int()?;
                self.log.ints.push(v);
                Ok(v)
            }
            Mode::Replay(ref mut c) => pop(&self.log.ints, &mut c.ints, ReplayStream::Ints),
        }
    }

    fn next_below(&mut self, max: i32) -> Result<i32, SimError> {
        match self.mode {
            Mode::Record => {
                let v = self.inner.next_below(max)?;
                self.log.ints.push(v);
                Ok(v)
            }
            Mode::Replay(_) if max < 0 => Err(SimError::InvalidRange { min: 0, max }),
            Mode::Replay(ref mut c) => {
                let value = *self.log.ints.get(c.ints).ok_or(SimError::ReplayExhausted {
                    stream: ReplayStream::Ints,
                })?;
                let in_bounds = if max == 0 {
                    value == 0
                } else {
                    (0..max).contains(&value)
                };
                if !in_bounds {
                    return Err(SimError::ReplayOutOfBounds { max, value });
                }
                c.ints += 1;
                Ok(value)
            }
        }
    }

    fn next_range(&mut self, min: i32, max: i32) -> Result<i32, SimError> {
        match self.mode {
            Mode::Record => {
                let value = self.inner.next_range(min, max)?;
                self.log.int_ranges.push(IntRangeEntry { min, max, value });
                Ok(value)
            }
            Mode::Replay(ref mut c) => {
                let entry = *self
                    .log
                    .int_ranges
                    .get(c.ranges)
                    .ok_or(SimError::ReplayExhausted {
                        stream: ReplayStream::IntRanges,
                    })?;
                if entry.min != min || entry.max != max {
                    return Err(SimError::ReplayMismatch {
                        requested_min: min,
                        requested_max: max,
                        recorded_min: entry.min,
                        recorded_max: entry.max,
                    });
                }
                c.ranges += 1;
                Ok(entry.value)
            }
        }
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.inner.fill_bytes(buf);
    }

    fn fill_non_zero_bytes(&mut self, buf: &mut [u8]) {
        self.inner.fill_non_zero_bytes(buf);
    }
}
