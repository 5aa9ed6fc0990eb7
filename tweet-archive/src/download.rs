use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use reqwest::ClientBuilder;
use twitter_archive::{fetch_all, read_media_rows, FetchOptions, FetchSummary, MediaColumns};

pub async fn download(
    input: &Path,
    download_path: &Path,
    columns: &MediaColumns,
    options: &FetchOptions,
) -> Result<FetchSummary> {
    let rows = read_media_rows(input, columns)?;

    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(30))
        .build()?;
    let summary = fetch_all(&client, &rows, download_path, options).await?;

    if !summary.failures.is_empty() {
        eprintln!("\nErrors:");
        for failure in &summary.failures {
            eprintln!(
                "[{}][{}] media {}: {}",
                &failure.tweet_id, failure.index, &failure.media_id, failure.error
            );
        }
    }

    println!(
        "Process finished (number of media files downloaded: {}/{}). Check out your files at {}!",
        summary.succeeded,
        summary.attempted,
        download_path.display()
    );

    Ok(summary)
}
