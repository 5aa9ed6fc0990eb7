use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::archive::{RawMediaItem, RawTweet, RawVariant};
use crate::config::ExtractOptions;
use crate::error::{MalformedTweetError, MediaResolutionError};
use crate::table::Row;
use crate::tweet::TweetHeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRecord {
    pub tweet_id: String,
    pub tweet_date: String,
    pub tweet_iso_date: String,
    pub tweet_unix_timestamp: f64,
    pub tweet_url: String,
    pub possible_rt: bool,
    pub media_id: Option<String>,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub media_expanded_url: Option<String>,
    pub error: Option<String>,
}

impl Row for MediaRecord {
    const COLUMNS: &'static [&'static str] = &[
        "tweet_id",
        "tweet_date",
        "tweet_iso_date",
        "tweet_unix_timestamp",
        "tweet_url",
        "possible_rt",
        "media_id",
        "media_type",
        "media_url",
        "media_expanded_url",
        "error",
    ];

    fn unix_timestamp(&self) -> f64 {
        self.tweet_unix_timestamp
    }
}

impl MediaRecord {
    /// One record per attached media item, in attachment order. A tweet
    /// without media yields nothing and is not validated.
    pub fn extract_all(
        tweet: &RawTweet,
        options: &ExtractOptions,
    ) -> Result<Vec<Self>, MalformedTweetError> {
        let media = tweet.media();
        if media.is_empty() {
            return Ok(vec![]);
        }

        let header = TweetHeader::parse(tweet, options)?;
        Ok(media
            .iter()
            .map(|item| Self::from_item(&header, item))
            .collect())
    }

    fn from_item(header: &TweetHeader, value: &Value) -> Self {
        let (item, resolved) = match RawMediaItem::from_value(value) {
            Ok(item) => {
                let resolved = resolve_media_url(&item);
                (item, resolved)
            }
            Err(e) => (RawMediaItem::default(), Err(e)),
        };
        let (media_url, error) = match resolved {
            Ok(url) => (url, None),
            Err(e) => {
                warn!(
                    "[{}] media {}: {}",
                    &header.id,
                    value.get("id_str").and_then(serde_json::Value::as_str).unwrap_or("?"),
                    e
                );
                (None, Some(e.to_string()))
            }
        };

        Self {
            tweet_id: header.id.clone(),
            tweet_date: header.date.clone(),
            tweet_iso_date: header.iso_date.clone(),
            tweet_unix_timestamp: header.unix_timestamp,
            tweet_url: header.url.clone(),
            possible_rt: header.possible_rt,
            media_id: item.id_str.clone(),
            media_type: item.media_type.clone(),
            media_url,
            media_expanded_url: item.expanded_url.clone(),
            error,
        }
    }
}

/// Best download URL for a media item. Types other than photos, videos and
/// GIFs have none and are not an error.
pub fn resolve_media_url(item: &RawMediaItem) -> Result<Option<String>, MediaResolutionError> {
    if item.id_str.is_none() {
        return Err(MediaResolutionError::MissingField("id_str"));
    }
    let media_type = item
        .media_type
        .as_deref()
        .ok_or(MediaResolutionError::MissingField("type"))?;

    match media_type {
        "photo" => {
            let url = item
                .media_url_https
                .as_deref()
                .ok_or(MediaResolutionError::MissingField("media_url_https"))?;
            Ok(Some(format!("{}?name=large", url)))
        }
        "video" | "animated_gif" => {
            let variants = item
                .video_info()?
                .and_then(|v| v.variants)
                .ok_or(MediaResolutionError::MissingField("video_info.variants"))?;
            best_variant(&variants).map(Some)
        }
        _ => Ok(None),
    }
}

/// URL of the highest bitrate variant. The first one wins a tie.
fn best_variant(variants: &[RawVariant]) -> Result<String, MediaResolutionError> {
    let mut best: Option<(i64, &RawVariant)> = None;
    for variant in variants {
        let bitrate = variant.bitrate()?;
        if best.map_or(true, |(max, _)| bitrate > max) {
            best = Some((bitrate, variant));
        }
    }

    let (_, variant) = best.ok_or(MediaResolutionError::NoVariants)?;
    variant
        .url
        .clone()
        .ok_or(MediaResolutionError::MissingField("url"))
}
