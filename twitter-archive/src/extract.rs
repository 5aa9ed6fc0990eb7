use tracing::warn;

use crate::archive::{archive_tweets, ArchiveEntry, RawTweet};
use crate::config::{ExtractOptions, MalformedPolicy};
use crate::error::{MalformedEntry, MalformedTweetError};
use crate::media::MediaRecord;
use crate::table::Row;
use crate::tweet::TweetRecord;

/// Rows of one table, in output order, and the entries left out.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<R> {
    pub rows: Vec<R>,
    pub skipped: Vec<MalformedEntry>,
}

pub fn extract_tweets(
    entries: &[ArchiveEntry],
    options: &ExtractOptions,
) -> Result<Extracted<TweetRecord>, MalformedEntry> {
    collect(entries, options, |tweet| {
        TweetRecord::extract(tweet, options).map(|r| vec![r])
    })
}

pub fn extract_media(
    entries: &[ArchiveEntry],
    options: &ExtractOptions,
) -> Result<Extracted<MediaRecord>, MalformedEntry> {
    collect(entries, options, |tweet| MediaRecord::extract_all(tweet, options))
}

fn collect<R, F>(
    entries: &[ArchiveEntry],
    options: &ExtractOptions,
    extract: F,
) -> Result<Extracted<R>, MalformedEntry>
where
    R: Row,
    F: Fn(&RawTweet) -> Result<Vec<R>, MalformedTweetError>,
{
    let mut rows = vec![];
    let mut skipped = vec![];

    for (index, tweet) in archive_tweets(entries) {
        match tweet.and_then(|t| extract(&t)) {
            Ok(r) => rows.extend(r),
            Err(source) => {
                let entry = MalformedEntry { index, source };
                match options.malformed {
                    MalformedPolicy::Abort => return Err(entry),
                    MalformedPolicy::Skip => {
                        warn!("skipping {}", entry);
                        skipped.push(entry);
                    }
                }
            }
        }
    }

    sort_by_timestamp(&mut rows);
    Ok(Extracted { rows, skipped })
}

/// Stable, so rows sharing a timestamp keep archive order.
pub fn sort_by_timestamp<R: Row>(rows: &mut [R]) {
    rows.sort_by(|a, b| a.unix_timestamp().total_cmp(&b.unix_timestamp()));
}
