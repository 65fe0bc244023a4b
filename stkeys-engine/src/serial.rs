//! Candidate serial construction.
//!
//! A SpeedTouch serial label reads `CP YY WW PP XXX (CC)`. Only the constant
//! prefix, the two-digit year, the two-digit week, and the three-digit unit
//! number enter the key derivation, and the unit digits do so indirectly:
//! each digit is replaced by the hex rendering of its ASCII code before the
//! serial is hashed, so unit 7 contributes `303037` rather than `007`.

/// Constant prefix shared by every SpeedTouch serial.
pub const SERIAL_PREFIX: &[u8; 2] = b"CP";

/// Length of the hashed portion of a serial: prefix + year + week + three
/// hex-expanded unit digits.
pub const SERIAL_LEN: usize = 12;

/// Hex lookup table for digest and serial rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Builds the hashed-serial bytes for a (year, week, unit) triple.
///
/// `year` is the two-digit serial year (0-99), `week` runs 1-52 and `unit`
/// 0-999; both year and week are zero-padded to two digits. The result is
/// always ASCII, e.g. `serial_bytes(17, 7, 111)` yields `CP1707313131`.
pub fn serial_bytes(year: u8, week: u8, unit: u16) -> [u8; SERIAL_LEN] {
    debug_assert!(year <= 99);
    debug_assert!((1..=52).contains(&week));
    debug_assert!(unit <= 999);

    let mut serial = [0u8; SERIAL_LEN];
    serial[0] = SERIAL_PREFIX[0];
    serial[1] = SERIAL_PREFIX[1];
    serial[2] = b'0' + year / 10;
    serial[3] = b'0' + year % 10;
    serial[4] = b'0' + week / 10;
    serial[5] = b'0' + week % 10;

    let digits = [(unit / 100) as u8, (unit / 10 % 10) as u8, (unit % 10) as u8];
    for (i, digit) in digits.into_iter().enumerate() {
        let code = b'0' + digit;
        serial[6 + 2 * i] = HEX_CHARS[(code >> 4) as usize];
        serial[7 + 2 * i] = HEX_CHARS[(code & 0x0F) as usize];
    }

    serial
}
