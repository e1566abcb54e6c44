//! Downloading the bulletin and decoding its Big5 text.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Fetch the raw bulletin bytes.
pub async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;

    let bytes = resp.bytes().await.context("read response body")?;
    Ok(bytes.to_vec())
}

/// Download `url` and keep an untouched copy at `path`.
pub async fn download_to(client: &reqwest::Client, url: &str, path: &Path) -> Result<Vec<u8>> {
    let bytes = download(client, url).await?;
    fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    info!("File downloaded and saved as {}", path.display());
    Ok(bytes)
}

/// Decode bulletin bytes as Big5. Unmappable sequences become U+FFFD.
pub fn decode_big5(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::BIG5.decode(bytes);
    if had_errors {
        warn!("bulletin contained bytes that are not valid Big5");
    }
    text.into_owned()
}
