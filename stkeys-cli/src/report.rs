use stkeys_engine::MatchRecord;

/// Renders a match the way the serial label reads: `CP YY WW PP XXX (CC)`.
///
/// The production plant code and the configuration code never enter the key
/// derivation and cannot be recovered from the SSID, so both stay `??`. The
/// unit number is printed as a plain decimal.
pub fn match_line(record: &MatchRecord) -> String {
    format!(
        "Possible key '{}' found at serial number CP {:02} {:02} ?? {} (??)",
        record.key,
        record.year % 100,
        record.week,
        record.unit,
    )
}
