use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::MediaColumns;
use crate::error::TableError;

/// A record with a fixed column schema. Serialized fields must follow
/// `COLUMNS` in order.
pub trait Row: Serialize {
    const COLUMNS: &'static [&'static str];

    fn unix_timestamp(&self) -> f64;
}

pub fn write_rows<W: Write, R: Row>(writer: W, rows: &[R]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(R::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `rows` to `path`, creating its parent directory if needed.
pub fn write_table<R: Row>(path: impl AsRef<Path>, rows: &[R]) -> Result<(), TableError> {
    let path = path.as_ref();
    let create_err = |source| TableError::Create {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(create_err)?;
    }
    let file = File::create(path).map_err(create_err)?;
    write_rows(file, rows).map_err(|source| TableError::Write {
        path: path.to_owned(),
        source,
    })
}

/// Values the downloader needs from one media table row, as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRow {
    pub tweet_id: String,
    pub tweet_unix_timestamp: String,
    pub media_id: String,
    pub media_url: String,
}

pub fn read_media_rows(
    path: impl AsRef<Path>,
    columns: &MediaColumns,
) -> Result<Vec<MediaRow>, TableError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TableError::Read {
        path: path.to_owned(),
        source: source.into(),
    })?;
    read_media_rows_from(file, columns).map_err(|e| match e {
        ReadError::Csv(source) => TableError::Read {
            path: path.to_owned(),
            source,
        },
        ReadError::MissingColumn(column) => TableError::MissingColumn {
            path: path.to_owned(),
            column,
        },
    })
}

#[derive(Debug)]
pub(crate) enum ReadError {
    Csv(csv::Error),
    MissingColumn(String),
}

impl From<csv::Error> for ReadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub(crate) fn read_media_rows_from<R: Read>(
    reader: R,
    columns: &MediaColumns,
) -> Result<Vec<MediaRow>, ReadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let index_of = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| ReadError::MissingColumn(column.to_owned()))
    };
    let tweet_id = index_of(&columns.tweet_id)?;
    let tweet_unix_timestamp = index_of(&columns.tweet_unix_timestamp)?;
    let media_id = index_of(&columns.media_id)?;
    let media_url = index_of(&columns.media_url)?;

    let mut rows = vec![];
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().trim().to_owned();
        rows.push(MediaRow {
            tweet_id: field(tweet_id),
            tweet_unix_timestamp: field(tweet_unix_timestamp),
            media_id: field(media_id),
            media_url: field(media_url),
        });
    }

    Ok(rows)
}
