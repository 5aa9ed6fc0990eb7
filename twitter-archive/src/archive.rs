use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ArchiveError, MalformedTweetError, MediaResolutionError};

/// One element of the archive array. The tweet is kept as raw JSON and
/// checked one entry at a time, so a mistyped field only affects its tweet.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ArchiveEntry {
    pub tweet: Option<Value>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawTweet {
    pub id_str: Option<String>,
    pub created_at: Option<String>,
    /// Outer `None`: key absent. Inner `None`: explicit `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub full_text: Option<Option<String>>,
    pub extended_entities: Option<RawExtendedEntities>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawExtendedEntities {
    /// Items are typed one by one in [`RawMediaItem::from_value`].
    pub media: Option<Vec<Value>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawMediaItem {
    pub id_str: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub expanded_url: Option<String>,
    pub media_url_https: Option<String>,
    pub video_info: Option<Value>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawVideoInfo {
    pub variants: Option<Vec<RawVariant>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawVariant {
    pub bitrate: Option<RawBitrate>,
    pub url: Option<String>,
}

/// Archives store bitrates as strings, the API as integers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawBitrate {
    Number(i64),
    Text(String),
    Other(Value),
}

impl RawTweet {
    pub fn from_value(value: &Value) -> Result<Self, MalformedTweetError> {
        Self::deserialize(value).map_err(|e| MalformedTweetError::InvalidTweet(e.to_string()))
    }

    pub fn media(&self) -> &[Value] {
        self.extended_entities
            .as_ref()
            .and_then(|e| e.media.as_deref())
            .unwrap_or_default()
    }

    pub fn has_media(&self) -> bool {
        !self.media().is_empty()
    }
}

impl RawMediaItem {
    pub fn from_value(value: &Value) -> Result<Self, MediaResolutionError> {
        Self::deserialize(value).map_err(|e| MediaResolutionError::InvalidField {
            field: "media",
            msg: e.to_string(),
        })
    }

    /// `video_info`, `None` when absent or `null`.
    pub fn video_info(&self) -> Result<Option<RawVideoInfo>, MediaResolutionError> {
        self.video_info
            .as_ref()
            .map(|v| {
                RawVideoInfo::deserialize(v).map_err(|e| MediaResolutionError::InvalidField {
                    field: "video_info",
                    msg: e.to_string(),
                })
            })
            .transpose()
    }
}

impl RawVariant {
    /// Bitrate of the variant, missing counts as 0.
    pub fn bitrate(&self) -> Result<i64, MediaResolutionError> {
        match &self.bitrate {
            None => Ok(0),
            Some(RawBitrate::Number(n)) => Ok(*n),
            Some(RawBitrate::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| MediaResolutionError::InvalidBitrate(s.clone())),
            Some(RawBitrate::Other(v)) => Err(MediaResolutionError::InvalidBitrate(v.to_string())),
        }
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

pub fn read_archive(path: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ArchiveError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_archive(&contents)
}

/// Parses `tweets.json`, or `tweets.js` as shipped in the export zip
/// (`window.YTD.tweets.part0 = [...]`).
pub fn parse_archive(contents: &str) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let body = contents.trim_start_matches('\u{feff}').trim_start();
    let body = match body.find('[') {
        Some(start) if !body.starts_with('[') => &body[start..],
        _ => body,
    };
    serde_json::from_str(body).map_err(|source| ArchiveError::Parse { source })
}

/// Tweets present in the archive with their position in it. A tweet whose
/// fields have the wrong JSON type comes back as an error.
pub fn archive_tweets(
    entries: &[ArchiveEntry],
) -> impl Iterator<Item = (usize, Result<RawTweet, MalformedTweetError>)> + '_ {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| Some((i, RawTweet::from_value(e.tweet.as_ref()?))))
}
