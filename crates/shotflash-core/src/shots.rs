//! Reconstructing individual shots from aggregate counts.
//!
//! A job result only reports how often each outcome occurred. The animation
//! needs one outcome per frame, so the counts are first compacted to a
//! bounded number of shots and then expanded back into a list.

use std::fmt;

use crate::counts::Counts;

/// Default ceiling on the number of shots that become animation frames.
pub const DEFAULT_SHOT_CAP: u64 = 100;

/// A single measurement outcome, qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shot {
    bits: String,
}

impl Shot {
    /// Build a shot from a counts key: register spaces are dropped and the
    /// bit order is reversed so that index 0 is qubit 0.
    pub fn from_counts_key(key: &str) -> Self {
        let bits = key.chars().rev().filter(|c| !c.is_whitespace()).collect();
        Self { bits }
    }

    /// Number of qubits in this shot.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Whether qubit `qubit` measured `1`. Out-of-range indices read as `0`.
    pub fn bit(&self, qubit: usize) -> bool {
        self.bits.as_bytes().get(qubit) == Some(&b'1')
    }

    /// Iterate over the bits, qubit 0 first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.bytes().map(|b| b == b'1')
    }

    /// The shot as a string, qubit 0 first.
    pub fn as_str(&self) -> &str {
        &self.bits
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

/// The ordered list of reconstructed shots.
pub type ShotList = Vec<Shot>;

/// Expand counts into one [`Shot`] per occurrence.
///
/// The order of distinct outcomes follows the iteration order of `counts`
/// and must not be relied upon.
pub fn expand(counts: &Counts) -> ShotList {
    let mut shots = Vec::new();
    for (key, &count) in counts.iter() {
        let shot = Shot::from_counts_key(key);
        for _ in 0..count {
            shots.push(shot.clone());
        }
    }
    shots
}

/// Scale counts down so that they add up to at most `cap` shots.
///
/// Counts that already fit are returned unchanged. Otherwise every count is
/// divided by `total / cap` and floored, and outcomes that drop to zero are
/// removed. If nothing survives, the original counts are returned so the
/// animation still has frames.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compact(counts: &Counts, cap: u64) -> Counts {
    let total: u128 = counts.iter().map(|(_, &count)| u128::from(count)).sum();
    if total <= u128::from(cap) {
        return counts.clone();
    }

    let scale = total as f64 / cap as f64;
    let compacted: Counts = counts
        .iter()
        .map(|(key, &count)| (key.clone(), (count as f64 / scale).floor() as u64))
        .filter(|(_, count)| *count != 0)
        .collect();

    if compacted.is_empty() {
        tracing::debug!(total, cap, "compaction left no shots, keeping original counts");
        return counts.clone();
    }
    compacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_reverses_bits() {
        let shots = expand(&Counts::from_pairs([("001", 2)]));
        assert_eq!(shots.len(), 2);
        assert!(shots.iter().all(|s| s.as_str() == "100"));
    }

    #[test]
    fn test_expand_lengths() {
        let shots = expand(&Counts::from_pairs([("000", 3), ("111", 2)]));
        assert_eq!(shots.len(), 5);
        assert_eq!(shots.iter().filter(|s| s.as_str() == "000").count(), 3);
        assert_eq!(shots.iter().filter(|s| s.as_str() == "111").count(), 2);
    }

    #[test]
    fn test_expand_strips_register_spaces() {
        let shots = expand(&Counts::from_pairs([("10 01", 1)]));
        assert_eq!(shots[0].as_str(), "1001");
        assert_eq!(shots[0].width(), 4);
    }

    #[test]
    fn test_expand_zero_count() {
        let shots = expand(&Counts::from_pairs([("01", 0), ("10", 1)]));
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].as_str(), "01");
    }

    #[test]
    fn test_shot_bits() {
        let shot = Shot::from_counts_key("0011");
        assert!(shot.bit(0));
        assert!(shot.bit(1));
        assert!(!shot.bit(2));
        assert!(!shot.bit(3));
        assert!(!shot.bit(10));
        assert_eq!(shot.bits().collect::<Vec<_>>(), vec![true, true, false, false]);
    }

    #[test]
    fn test_compact_small_unchanged() {
        let counts = Counts::from_pairs([("00", 40), ("11", 60)]);
        assert_eq!(compact(&counts, DEFAULT_SHOT_CAP), counts);
    }

    #[test]
    fn test_compact_scales_down() {
        let counts = Counts::from_pairs([("000", 510), ("111", 514)]);
        let compacted = compact(&counts, DEFAULT_SHOT_CAP);
        // scale = 10.24
        assert_eq!(compacted.get("000"), 49);
        assert_eq!(compacted.get("111"), 50);
    }

    #[test]
    fn test_compact_drops_rare_outcomes() {
        let counts = Counts::from_pairs([("00", 995), ("01", 5)]);
        let compacted = compact(&counts, DEFAULT_SHOT_CAP);
        assert_eq!(compacted.get("00"), 99);
        assert_eq!(compacted.len(), 1);
    }

    #[test]
    fn test_compact_totals_beyond_u64() {
        let counts = Counts::from_pairs([("00", u64::MAX), ("11", u64::MAX)]);
        let compacted = compact(&counts, DEFAULT_SHOT_CAP);
        assert!((49..=50).contains(&compacted.get("00")));
        assert!((49..=50).contains(&compacted.get("11")));
        assert!(compacted.total_shots() <= DEFAULT_SHOT_CAP);
    }

    #[test]
    fn test_compact_falls_back_when_everything_vanishes() {
        let counts: Counts = (0..200u32).map(|i| (format!("{i:08b}"), 1)).collect();
        let compacted = compact(&counts, DEFAULT_SHOT_CAP);
        assert_eq!(compacted, counts);
    }
}
