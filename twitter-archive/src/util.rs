use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};

use crate::config::OutputZone;

/// `created_at` layout used by Twitter, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %T %z %Y";

/// Layout of the timestamp part of downloaded media file names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d_%H.%M.%S";

pub(crate) fn parse_created_at(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(s, CREATED_AT_FORMAT)
}

pub(crate) fn unix_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1e6
}

pub(crate) fn iso_date<Tz: TimeZone>(time: &DateTime<Tz>, zone: OutputZone) -> String {
    zone.convert(time)
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub(crate) fn from_unix_timestamp(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}
