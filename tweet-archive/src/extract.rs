use std::path::Path;

use anyhow::Result;
use twitter_archive::{
    extract_media, extract_tweets, read_archive, write_table, ExtractOptions, MalformedEntry,
};

/// Writes the tweet table, returns the number of rows.
pub fn tweets(input: &Path, output: &Path, options: &ExtractOptions) -> Result<usize> {
    let entries = read_archive(input)?;
    let extracted = extract_tweets(&entries, options)?;
    write_table(output, &extracted.rows)?;

    report_skipped(&extracted.skipped);
    println!(
        "Process finished (number of tweets extracted: {}). Check out your file at {}!",
        extracted.rows.len(),
        output.display()
    );

    Ok(extracted.rows.len())
}

/// Writes the media table, returns the number of rows.
pub fn media(input: &Path, output: &Path, options: &ExtractOptions) -> Result<usize> {
    let entries = read_archive(input)?;
    let extracted = extract_media(&entries, options)?;
    write_table(output, &extracted.rows)?;

    report_skipped(&extracted.skipped);
    let unresolved = extracted.rows.iter().filter(|r| r.error.is_some()).count();
    if unresolved > 0 {
        eprintln!("{} media items have no URL, see the error column", unresolved);
    }
    println!(
        "Process finished (number of media files extracted: {}). Check out your file at {}!",
        extracted.rows.len(),
        output.display()
    );

    Ok(extracted.rows.len())
}

fn report_skipped(skipped: &[MalformedEntry]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("\nSkipped {} malformed tweets:", skipped.len());
    for entry in skipped {
        eprintln!("  {}", entry);
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use twitter_archive::{MalformedPolicy, OutputZone};

    use super::*;

    const ARCHIVE: &str = r#"window.YTD.tweets.part0 = [
      {"tweet": {"id_str": "20", "created_at": "Thu Oct 11 20:19:24 +0000 2018", "full_text": "pics",
        "extended_entities": {"media": [
          {"id_str": "1", "type": "photo", "media_url_https": "https://x/1.jpg", "expanded_url": "https://e/1"},
          {"id_str": "2", "type": "video", "expanded_url": "https://e/2"}
        ]}}},
      {"tweet": {"id_str": "10", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "full_text": "plain\ntext"}},
      {"tweet": {"id_str": "30", "full_text": "no date"}}
    ]"#;

    fn options(malformed: MalformedPolicy) -> ExtractOptions {
        ExtractOptions {
            zone: OutputZone::east(0).unwrap(),
            malformed,
            ..Default::default()
        }
    }

    fn setup() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tweets.js");
        fs::write(&input, ARCHIVE).unwrap();
        (dir, input)
    }

    #[test]
    fn tweet_table_file() {
        let (dir, input) = setup();
        let output = dir.path().join("output").join("tweet_info.csv");

        let n = tweets(&input, &output, &options(MalformedPolicy::Skip)).unwrap();

        assert_eq!(2, n);
        let table = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(
            "tweet_id,tweet_date,tweet_iso_date,tweet_unix_timestamp,has_media,possible_rt,tweet_text,tweet_url",
            lines[0]
        );
        assert!(lines[1].starts_with("10,"));
        assert!(lines[1].contains("\"plain text,\""));
        assert!(lines[2].starts_with("20,"));
    }

    #[test]
    fn media_table_file() {
        let (dir, input) = setup();
        let output = dir.path().join("media_info.csv");

        let n = media(&input, &output, &options(MalformedPolicy::Skip)).unwrap();

        assert_eq!(2, n);
        let table = fs::read_to_string(&output).unwrap();
        assert_eq!(3, table.lines().count());
        assert!(table.contains("https://x/1.jpg?name=large"));
        assert!(table.contains("missing field `video_info.variants`"));
    }

    #[test]
    fn malformed_tweet_aborts() {
        let (dir, input) = setup();
        let output = dir.path().join("tweet_info.csv");

        let err = tweets(&input, &output, &options(MalformedPolicy::Abort)).unwrap_err();
        assert!(err.to_string().contains("archive entry 2"));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = tweets(
            &dir.path().join("tweets.json"),
            &dir.path().join("out.csv"),
            &ExtractOptions::default(),
        );
        assert!(result.is_err());
    }
}
