use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("unable to read archive {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse archive: {source}")]
    Parse { source: serde_json::Error },
}

/// A tweet whose required fields are absent or unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTweetError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("unable to parse created_at `{value}`: {msg}")]
    InvalidDate { value: String, msg: String },

    #[error("invalid tweet: {0}")]
    InvalidTweet(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("archive entry {index}: {source}")]
pub struct MalformedEntry {
    pub index: usize,
    pub source: MalformedTweetError,
}

/// Reason a single media item has no download URL. Stored in the `error`
/// column of its row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaResolutionError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("video_info.variants is empty")]
    NoVariants,

    #[error("invalid bitrate `{0}`")]
    InvalidBitrate(String),

    #[error("invalid `{field}`: {msg}")]
    InvalidField { field: &'static str, msg: String },
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("unable to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },

    #[error("unable to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: csv::Error },

    #[error("{}: missing column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unable to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("empty {column}")]
    MissingValue { column: &'static str },

    #[error("invalid timestamp `{value}`")]
    InvalidTimestamp { value: String },

    #[error("unable to derive file name from {url}: {msg}")]
    InvalidUrl { url: String, msg: String },

    #[error("unable to download {url}: {msg}")]
    Download { url: String, msg: String },
}
