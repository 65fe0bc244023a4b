use stkeys_engine::{FIRST_YEAR, LAST_YEAR};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the SSID tail must not be empty")]
    EmptySsidTail,

    #[error("year {year} predates the serial range (serials start in {FIRST_YEAR})")]
    YearBeforeFirst { year: u16 },

    #[error("year {year} does not fit the two-digit serial year field (last expressible year is {LAST_YEAR})")]
    YearAfterLast { year: u16 },
}
