use std::path::PathBuf;

use serde::Deserialize;
use twitter_archive::{MediaColumns, DEFAULT_MAX_CONNECTIONS};

/// Downloading the files listed in a media table
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DownloadConfig {
    #[serde(deserialize_with = "super::deserialize_path")]
    pub input_path: PathBuf,
    #[serde(deserialize_with = "super::deserialize_path")]
    pub download_path: PathBuf,
    pub max_connections: usize,
    pub columns: MediaColumns,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("output/media_info.csv"),
            download_path: PathBuf::from("output/media/"),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            columns: MediaColumns::default(),
        }
    }
}
