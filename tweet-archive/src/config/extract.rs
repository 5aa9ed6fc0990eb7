use std::path::PathBuf;

use serde::Deserialize;
use twitter_archive::DEFAULT_STATUS_BASE_URL;

/// Building the tweet and media tables from an archive
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractConfig {
    #[serde(deserialize_with = "super::deserialize_path")]
    pub input_path: PathBuf,
    #[serde(deserialize_with = "super::deserialize_path")]
    pub tweet_table_path: PathBuf,
    #[serde(deserialize_with = "super::deserialize_path")]
    pub media_table_path: PathBuf,
    pub status_base_url: String,
    pub trailing_comma: bool,
    pub skip_malformed: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input/tweets.json"),
            tweet_table_path: PathBuf::from("output/tweet_info.csv"),
            media_table_path: PathBuf::from("output/media_info.csv"),
            status_base_url: DEFAULT_STATUS_BASE_URL.to_owned(),
            trailing_comma: true,
            skip_malformed: false,
        }
    }
}
