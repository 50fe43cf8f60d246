//! Measurement counts as reported by a job result.
//!
//! Bitstring ordering follows the OpenQASM/Qiskit convention: the rightmost
//! character is qubit 0. Whitespace separates classical registers and carries
//! no information, so it is ignored when measuring widths.
//!
//! Counts parsed from JSON are validated on the way in. Counts assembled in
//! code with [`Counts::from_pairs`] or [`Counts::insert`] are not, and are
//! checked with [`Counts::validate`] before they are animated.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// Measurement counts: bitstring to number of occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "FxHashMap<String, u64>",
    try_from = "FxHashMap<String, i64>"
)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

/// Accepted JSON shapes for counts input.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountsDocument {
    /// An execution result object with a `counts` field.
    Result { counts: FxHashMap<String, i64> },
    /// A bare `{"bitstring": count}` map.
    Bare(FxHashMap<String, i64>),
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from an iterator of (bitstring, count) pairs.
    /// Duplicate bitstrings are accumulated. Keys are not checked.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Create counts from signed values, rejecting negative counts,
    /// malformed bitstrings and totals that do not fit in a `u64`.
    pub fn try_from_signed(
        iter: impl IntoIterator<Item = (impl Into<String>, i64)>,
    ) -> AnimResult<Self> {
        let mut counts = Self::new();
        for (k, v) in iter {
            let key = k.into();
            if !is_bitstring(&key) {
                return Err(AnimError::InvalidBitstring(key));
            }
            let count = u64::try_from(v).map_err(|_| AnimError::InvalidCount {
                bitstring: key.clone(),
                count: v,
            })?;
            let slot = counts.counts.entry(key).or_default();
            *slot = slot
                .checked_add(count)
                .ok_or(AnimError::ShotCountOverflow)?;
        }
        counts.checked_total()?;
        Ok(counts)
    }

    /// Parse counts from JSON, either a bare map or a result object
    /// carrying a `counts` field.
    pub fn from_json_str(json: &str) -> AnimResult<Self> {
        let raw = match serde_json::from_str::<CountsDocument>(json)? {
            CountsDocument::Result { counts } | CountsDocument::Bare(counts) => counts,
        };
        Self::try_from_signed(raw)
    }

    /// Read and parse a counts JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AnimResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Insert a count for a bitstring. Accumulation saturates at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let slot = self.counts.entry(bitstring.into()).or_default();
        *slot = slot.saturating_add(count);
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Total number of shots, saturating at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().fold(0, |acc, &v| acc.saturating_add(v))
    }

    /// Total number of shots, or `ShotCountOverflow` if it does not fit in
    /// a `u64`.
    pub fn checked_total(&self) -> AnimResult<u64> {
        self.counts
            .values()
            .try_fold(0_u64, |acc, &v| acc.checked_add(v))
            .ok_or(AnimError::ShotCountOverflow)
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if there are no bitstrings.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sorted counts, most frequent first. Ties are broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Number of measured bits, i.e. the width of every key once whitespace
    /// is removed.
    ///
    /// Fails if there are no keys or the keys disagree on width.
    pub fn width(&self) -> AnimResult<usize> {
        let mut keys = self.counts.keys();
        let first = keys.next().ok_or(AnimError::EmptyCounts)?;
        let expected = bit_width(first);
        for key in keys {
            let found = bit_width(key);
            if found != expected {
                return Err(AnimError::InconsistentWidth {
                    first: first.clone(),
                    expected,
                    other: key.clone(),
                    found,
                });
            }
        }
        Ok(expected)
    }

    /// Check keys, widths and the shot total, returning the width.
    pub fn validate(&self) -> AnimResult<usize> {
        if let Some(key) = self.counts.keys().find(|k| !is_bitstring(k)) {
            return Err(AnimError::InvalidBitstring(key.clone()));
        }
        let width = self.width()?;
        self.checked_total()?;
        Ok(width)
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl TryFrom<FxHashMap<String, i64>> for Counts {
    type Error = AnimError;

    fn try_from(raw: FxHashMap<String, i64>) -> AnimResult<Self> {
        Self::try_from_signed(raw)
    }
}

impl From<Counts> for FxHashMap<String, u64> {
    fn from(counts: Counts) -> Self {
        counts.counts
    }
}

fn is_bitstring(key: &str) -> bool {
    key.chars().all(|c| c == '0' || c == '1' || c.is_whitespace())
}

fn bit_width(key: &str) -> usize {
    key.chars().filter(|c| !c.is_whitespace()).count()
}
