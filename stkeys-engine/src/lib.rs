//! SpeedTouch default wireless key recovery from the SSID tail.
//!
//! Thomson SpeedTouch access points derive both the broadcast SSID suffix
//! and the default wireless key from the unit's serial number (researched by
//! Kevin Devine, 2008). A serial label reads `CP YY WW PP XXX (CC)`:
//! constant `CP` prefix, two-digit manufacture year, two-digit week, a
//! production plant code, a three-digit unit number, and a configuration
//! code. The derivation uses only the prefix, year, week, and unit number,
//! with the three unit digits expanded to the hex rendering of their ASCII
//! codes. The SHA-1 digest of that string yields the SSID tail (last six
//! hex characters) and the default key (first ten hex characters).
//!
//! Recovering a key is therefore a bounded brute force: enumerate every
//! (year, week, unit) triple a unit could have shipped with, hash the
//! reconstructed serial, and report every digest whose tail matches the
//! observed SSID tail. One serial year is 52 weeks of 1,000 unit numbers,
//! so scanning from the current year back to 2000 stays under a couple of
//! million SHA-1 invocations.
//!
//! # Worked example
//!
//! A unit from week 7 of 2017 with unit number 111 hashes `CP1707313131`
//! (`"111"` expands to `313131`) to
//! `73e2ec5d26624f32d47ebe26ad4ab083e5ea6601`: it broadcasts
//! `SpeedTouchEA6601` and its default key is `73E2EC5D26`.
//!
//! ```
//! use stkeys_engine::KeyspaceScan;
//!
//! let hit = KeyspaceScan::single_year("ea6601", 2017)
//!     .find(|record| (record.week, record.unit) == (7, 111))
//!     .expect("the worked example always collides");
//! assert_eq!(hit.key, "73E2EC5D26");
//! assert_eq!(hit.year, 2017);
//! ```

pub mod scan;
pub mod serial;

pub use scan::{Candidates, KEY_LEN, KeyspaceScan, MatchRecord, TAIL_LEN};
pub use serial::{HEX_CHARS, SERIAL_LEN, SERIAL_PREFIX, serial_bytes};

/// Oldest serial year worth trying; units predate neither the product line
/// nor the year 2000.
pub const FIRST_YEAR: u16 = 2000;

/// Newest year the two-digit serial year field can express.
pub const LAST_YEAR: u16 = 2099;

/// Serial weeks run 1-52.
pub const WEEKS_PER_YEAR: u8 = 52;

/// Unit numbers are three decimal digits, 0-999.
pub const UNITS_PER_WEEK: u16 = 1000;

/// Serials hashed per manufacture year.
pub const CANDIDATES_PER_YEAR: u64 = WEEKS_PER_YEAR as u64 * UNITS_PER_WEEK as u64;

/// Serials a full scan from `newest_year` down to 2000 hashes.
///
/// # Panics
///
/// Panics if `newest_year` falls outside 2000-2099.
pub fn total_candidates(newest_year: u16) -> u64 {
    assert!(
        (FIRST_YEAR..=LAST_YEAR).contains(&newest_year),
        "serial years span {FIRST_YEAR}-{LAST_YEAR}"
    );
    (newest_year - FIRST_YEAR + 1) as u64 * CANDIDATES_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_candidates() {
        assert_eq!(total_candidates(2000), 52_000);
        assert_eq!(total_candidates(2017), 936_000);
    }
}
