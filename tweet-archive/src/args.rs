use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use twitter_archive::{ExtractOptions, FetchOptions, MalformedPolicy, MediaColumns, OutputZone};

use crate::config::download::DownloadConfig;
use crate::config::extract::ExtractConfig;
use crate::config::Config;

/// Extract tweets and media from a Twitter archive export
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Config file location
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Offset from UTC in seconds used for rendered dates. Defaults to the local time zone.
    #[arg(long, allow_negative_numbers = true)]
    timezone_offset: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one row per tweet.
    Tweets {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Write one row per photo, video or GIF attached to a tweet.
    Media {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Download the files listed in a media table.
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// Archive file, `tweets.json` or the `tweets.js` shipped in the export.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// CSV file to write.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Prefix joined with the tweet ID to build tweet_url.
    #[arg(long)]
    status_base_url: Option<String>,

    /// Do not append a comma to tweet_text.
    #[arg(long)]
    no_trailing_comma: bool,

    /// Leave out tweets missing required fields instead of failing.
    #[arg(long)]
    skip_malformed: bool,
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Media table to read.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Directory to save media files to.
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    output_directory: Option<PathBuf>,

    /// Column holding the tweet ID.
    #[arg(long)]
    column_tweet_id: Option<String>,

    /// Column holding the tweet UNIX timestamp.
    #[arg(long)]
    column_tweet_unix_timestamp: Option<String>,

    /// Column holding the media ID.
    #[arg(long)]
    column_media_id: Option<String>,

    /// Column holding the media URL.
    #[arg(long)]
    column_media_url: Option<String>,

    /// Maximum number of simultaneous downloads.
    #[arg(short = 'j', long)]
    max_connections: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct TableJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: ExtractOptions,
}

#[derive(Debug)]
pub(crate) struct DownloadJob {
    pub input: PathBuf,
    pub download_path: PathBuf,
    pub columns: MediaColumns,
    pub options: FetchOptions,
}

impl TableArgs {
    fn resolve(self, conf: &ExtractConfig, default_output: PathBuf, zone: OutputZone) -> TableJob {
        let malformed = if self.skip_malformed || conf.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };

        TableJob {
            input: self.input.unwrap_or_else(|| conf.input_path.clone()),
            output: self.output.unwrap_or(default_output),
            options: ExtractOptions {
                status_base_url: self
                    .status_base_url
                    .unwrap_or_else(|| conf.status_base_url.clone()),
                zone,
                text_trailing_comma: conf.trailing_comma && !self.no_trailing_comma,
                malformed,
            },
        }
    }
}

impl DownloadArgs {
    fn resolve(self, conf: &DownloadConfig, zone: OutputZone) -> DownloadJob {
        let defaults = &conf.columns;
        let columns = MediaColumns {
            tweet_id: self
                .column_tweet_id
                .unwrap_or_else(|| defaults.tweet_id.clone()),
            tweet_unix_timestamp: self
                .column_tweet_unix_timestamp
                .unwrap_or_else(|| defaults.tweet_unix_timestamp.clone()),
            media_id: self
                .column_media_id
                .unwrap_or_else(|| defaults.media_id.clone()),
            media_url: self
                .column_media_url
                .unwrap_or_else(|| defaults.media_url.clone()),
        };
        DownloadJob {
            input: self.input.unwrap_or_else(|| conf.input_path.clone()),
            download_path: self
                .output_directory
                .unwrap_or_else(|| conf.download_path.clone()),
            columns,
            options: FetchOptions {
                zone,
                max_connections: self.max_connections.unwrap_or(conf.max_connections),
            },
        }
    }
}

impl Args {
    pub async fn run(self) -> Result<()> {
        let conf = Config::load(self.config.as_deref())?;
        let zone = conf.zone(self.timezone_offset)?;

        match self.command {
            Commands::Tweets { table } => {
                let job = table.resolve(&conf.extract, conf.extract.tweet_table_path.clone(), zone);
                crate::extract::tweets(&job.input, &job.output, &job.options)?;
            }
            Commands::Media { table } => {
                let job = table.resolve(&conf.extract, conf.extract.media_table_path.clone(), zone);
                crate::extract::media(&job.input, &job.output, &job.options)?;
            }
            Commands::Download(args) => {
                let job = args.resolve(&conf.download, zone);
                crate::download::download(&job.input, &job.download_path, &job.columns, &job.options)
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tweet-archive").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn tweets_defaults() {
        let args = parse(&["tweets"]);
        let Commands::Tweets { table } = args.command else {
            panic!("expected tweets command");
        };
        let conf = Config::default();
        let job = table.resolve(
            &conf.extract,
            conf.extract.tweet_table_path.clone(),
            OutputZone::Local,
        );
        assert_eq!(PathBuf::from("input/tweets.json"), job.input);
        assert_eq!(PathBuf::from("output/tweet_info.csv"), job.output);
        assert!(job.options.text_trailing_comma);
        assert_eq!(MalformedPolicy::Abort, job.options.malformed);
    }

    #[test]
    fn media_flags_override_config() {
        let args = parse(&[
            "--timezone-offset",
            "-18000",
            "media",
            "-i",
            "data/tweets.js",
            "--no-trailing-comma",
            "--skip-malformed",
            "--status-base-url",
            "https://x.com/i/status/",
        ]);
        assert_eq!(Some(-18000), args.timezone_offset);
        let Commands::Media { table } = args.command else {
            panic!("expected media command");
        };
        let conf = Config::default();
        let job = table.resolve(
            &conf.extract,
            conf.extract.media_table_path.clone(),
            OutputZone::Local,
        );
        assert_eq!(PathBuf::from("data/tweets.js"), job.input);
        assert_eq!(PathBuf::from("output/media_info.csv"), job.output);
        assert!(!job.options.text_trailing_comma);
        assert_eq!(MalformedPolicy::Skip, job.options.malformed);
        assert_eq!("https://x.com/i/status/", job.options.status_base_url);
    }

    #[test]
    fn download_columns() {
        let args = parse(&[
            "download",
            "--column-media-url",
            "url",
            "-o",
            "saved",
            "-j",
            "1",
        ]);
        let Commands::Download(download) = args.command else {
            panic!("expected download command");
        };
        let job = download.resolve(&DownloadConfig::default(), OutputZone::Local);
        assert_eq!(PathBuf::from("output/media_info.csv"), job.input);
        assert_eq!(PathBuf::from("saved"), job.download_path);
        assert_eq!("url", job.columns.media_url);
        assert_eq!("tweet_id", job.columns.tweet_id);
        assert_eq!(1, job.options.max_connections);
    }

    #[test]
    fn subcommand_required() {
        assert!(Args::try_parse_from(["tweet-archive"]).is_err());
    }
}
