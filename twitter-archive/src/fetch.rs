use std::path::{Path, PathBuf};

use futures::stream::StreamExt;
use tracing::{info, warn};
use tweet_archive_common::{url_file_extension, MediaTransport};

use crate::config::{FetchOptions, OutputZone};
use crate::error::FetchError;
use crate::table::MediaRow;
use crate::util::{from_unix_timestamp, FILE_DATE_FORMAT};

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    /// Ordered by row index.
    pub failures: Vec<FetchFailure>,
}

#[derive(Debug)]
pub struct FetchFailure {
    pub index: usize,
    pub tweet_id: String,
    pub media_id: String,
    pub error: FetchError,
}

/// `<tweet_id> <media_id> <YYYY-MM-DD_HH.MM.SS>.<extension>`
pub fn media_filename(row: &MediaRow, zone: OutputZone) -> Result<String, FetchError> {
    if row.media_url.is_empty() {
        return Err(FetchError::MissingValue {
            column: "media_url",
        });
    }

    let invalid_ts = || FetchError::InvalidTimestamp {
        value: row.tweet_unix_timestamp.clone(),
    };
    let ts: f64 = row
        .tweet_unix_timestamp
        .parse()
        .map_err(|_| invalid_ts())?;
    let time = from_unix_timestamp(ts).ok_or_else(invalid_ts)?;
    let date = zone.convert(&time).format(FILE_DATE_FORMAT);

    let extension = url_file_extension(&row.media_url).map_err(|e| FetchError::InvalidUrl {
        url: row.media_url.clone(),
        msg: e.to_string(),
    })?;

    let name = format!("{} {} {}.{}", row.tweet_id, row.media_id, date, extension);
    Ok(sanitize_filename::sanitize(name))
}

/// Downloads every row into `dir`. Only failing to create `dir` is an
/// error; row failures are collected in the summary.
pub async fn fetch_all<T>(
    transport: &T,
    rows: &[MediaRow],
    dir: impl AsRef<Path>,
    options: &FetchOptions,
) -> Result<FetchSummary, FetchError>
where
    T: MediaTransport + ?Sized,
{
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| FetchError::CreateDirectory {
            path: dir.to_owned(),
            source,
        })?;

    let total = rows.len();
    let outcomes = futures::stream::iter(
        rows.iter()
            .enumerate()
            .map(|(i, row)| fetch_one(transport, row, dir, options.zone, i, total)),
    )
    .buffer_unordered(options.max_connections.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut summary = FetchSummary {
        attempted: total,
        ..Default::default()
    };
    for (index, outcome) in outcomes {
        match outcome {
            Ok(_) => summary.succeeded += 1,
            Err(error) => summary.failures.push(FetchFailure {
                index,
                tweet_id: rows[index].tweet_id.clone(),
                media_id: rows[index].media_id.clone(),
                error,
            }),
        }
    }
    summary.failures.sort_by_key(|f| f.index);

    Ok(summary)
}

async fn fetch_one<T>(
    transport: &T,
    row: &MediaRow,
    dir: &Path,
    zone: OutputZone,
    index: usize,
    total: usize,
) -> (usize, Result<PathBuf, FetchError>)
where
    T: MediaTransport + ?Sized,
{
    let result = save_row(transport, row, dir, zone).await;
    match &result {
        Ok(path) => info!(
            "[{}][{}/{}] Media {} downloaded: {}",
            &row.tweet_id,
            index,
            total,
            &row.media_id,
            path.display()
        ),
        Err(e) => warn!(
            "[{}][{}/{}] Couldn't download {}: {}",
            &row.tweet_id, index, total, &row.media_id, e
        ),
    }
    (index, result)
}

async fn save_row<T>(
    transport: &T,
    row: &MediaRow,
    dir: &Path,
    zone: OutputZone,
) -> Result<PathBuf, FetchError>
where
    T: MediaTransport + ?Sized,
{
    let path = dir.join(media_filename(row, zone)?);
    transport
        .fetch(&row.media_url, &path)
        .await
        .map_err(|e| FetchError::Download {
            url: row.media_url.clone(),
            msg: format!("{:#}", e),
        })?;
    Ok(path)
}
