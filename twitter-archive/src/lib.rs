mod archive;
mod config;
mod error;
mod extract;
mod fetch;
mod media;
mod table;
mod tweet;
mod util;

pub use archive::{
    archive_tweets, parse_archive, read_archive, ArchiveEntry, RawBitrate, RawExtendedEntities,
    RawMediaItem, RawTweet, RawVariant, RawVideoInfo,
};
pub use config::{
    ExtractOptions, FetchOptions, MalformedPolicy, MediaColumns, OutputZone,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_STATUS_BASE_URL,
};
pub use error::{
    ArchiveError, FetchError, MalformedEntry, MalformedTweetError, MediaResolutionError,
    TableError,
};
pub use extract::{extract_media, extract_tweets, sort_by_timestamp, Extracted};
pub use fetch::{fetch_all, media_filename, FetchFailure, FetchSummary};
pub use media::{resolve_media_url, MediaRecord};
pub use table::{read_media_rows, write_rows, write_table, MediaRow, Row};
pub use tweet::TweetRecord;
pub use util::{CREATED_AT_FORMAT, FILE_DATE_FORMAT};
