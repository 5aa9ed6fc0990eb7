use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use home_dir::HomeDirExt;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use twitter_archive::OutputZone;

use self::download::DownloadConfig;
use self::extract::ExtractConfig;

pub mod download;
pub mod extract;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Seconds east of UTC used for rendered dates. Local time zone if unset.
    pub timezone_offset: Option<i32>,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let conf_contents = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&conf_contents)?)
    }

    /// Reads `path`, or the default config file if there is one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path).context(format!("Failed to read config {:?}", path));
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                Self::read(&path).context(format!("Failed to read config {:?}", path))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn zone(&self, override_offset: Option<i32>) -> Result<OutputZone> {
        match override_offset.or(self.timezone_offset) {
            None => Ok(OutputZone::Local),
            Some(offset) => OutputZone::east(offset)
                .ok_or_else(|| anyhow!("timezone offset out of range: {}", offset)),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "Tweet Archive")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let s: PathBuf = Deserialize::deserialize(deserializer)?;
    s.expand_home().map_err(D::Error::custom)
}
