use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Something that can copy the body behind a URL into a local file.
#[async_trait]
pub trait MediaTransport: Sync {
    async fn fetch(&self, url: &str, path: &Path) -> Result<()>;
}

#[async_trait]
impl MediaTransport for Client {
    async fn fetch(&self, url: &str, path: &Path) -> Result<()> {
        streamed_download(self, url, path).await
    }
}

pub async fn streamed_download(client: &Client, url: &str, path: impl AsRef<Path>) -> Result<()> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let mut file = fs::File::create(path).await?;
    let mut stream = resp.bytes_stream();
    while let Some(b) = stream.next().await {
        let chunk = b?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(())
}

/// Percent-decoded last segment of the URL path, query and fragment excluded.
pub fn url_file_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut s| s.next_back())
        .ok_or_else(|| anyhow!("url has no path: {}", url))?;
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

/// Text after the final `.` of the decoded file name. A name without any
/// `.` is returned whole.
pub fn url_file_extension(url: &str) -> Result<String> {
    let name = url_file_name(url)?;
    Ok(name.rsplit('.').next().unwrap_or_default().to_owned())
}
