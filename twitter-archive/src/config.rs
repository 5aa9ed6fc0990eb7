use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Deserialize;

pub const DEFAULT_STATUS_BASE_URL: &str = "https://twitter.com/whatever/status/";
pub const DEFAULT_MAX_CONNECTIONS: usize = 20;

/// Time zone used when rendering instants for humans (ISO dates, file names).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl OutputZone {
    /// Zone `seconds` east of UTC, `None` if out of range.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self::Fixed)
    }

    pub fn convert<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => time.with_timezone(&Local).fixed_offset(),
            Self::Fixed(offset) => time.with_timezone(offset),
        }
    }
}

/// What to do with an archive entry whose tweet lacks a required field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Fail the whole extraction.
    #[default]
    Abort,
    /// Leave the entry out and report it.
    Skip,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Prefix joined with the tweet id to build `tweet_url`.
    pub status_base_url: String,
    pub zone: OutputZone,
    /// Append `,` to `tweet_text`. Older exports of this tool always did.
    pub text_trailing_comma: bool,
    pub malformed: MalformedPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            status_base_url: DEFAULT_STATUS_BASE_URL.to_owned(),
            zone: OutputZone::default(),
            text_trailing_comma: true,
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Names of the media table columns read by the downloader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaColumns {
    pub tweet_id: String,
    pub tweet_unix_timestamp: String,
    pub media_id: String,
    pub media_url: String,
}

impl Default for MediaColumns {
    fn default() -> Self {
        Self {
            tweet_id: "tweet_id".to_owned(),
            tweet_unix_timestamp: "tweet_unix_timestamp".to_owned(),
            media_id: "media_id".to_owned(),
            media_url: "media_url".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub zone: OutputZone,
    /// Downloads in flight at once; `1` is strictly sequential.
    pub max_connections: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            zone: OutputZone::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
