// src/fetch/mod.rs

use anyhow::{Context, Result};
use http_cache_reqwest::{CACacheManager, Cache, CacheMode, HttpCache, HttpCacheOptions};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;
use url::Url;

/// Build the cache-aware HTTP client every page fetch goes through.
///
/// Responses are stored unconditionally under `cache_dir`; the store's
/// internal format belongs to the caching layer, not to us.
pub fn cached_client(cache_dir: &Path) -> ClientWithMiddleware {
    ClientBuilder::new(reqwest::Client::new())
        .with(Cache(HttpCache {
            mode: CacheMode::ForceCache,
            manager: CACacheManager {
                path: cache_dir.to_path_buf(),
            },
            options: HttpCacheOptions::default(),
        }))
        .build()
}

/// Remove the cache store wholesale.
pub async fn clear_cache(cache_dir: &Path) -> Result<()> {
    if cache_dir.exists() {
        fs::remove_dir_all(cache_dir)
            .await
            .with_context(|| format!("clearing HTTP cache at {}", cache_dir.display()))?;
    }
    Ok(())
}

/// Fetch one page, decoding the body as UTF-8 regardless of what the
/// server claims.
///
/// Transport failures (connect, DNS, reset mid-body) are logged with the
/// URL and become `None`; the caller treats that as "skip this unit of
/// work". One attempt only, no retries.
pub async fn page(client: &ClientWithMiddleware, url: &Url) -> Option<String> {
    match client.get(url.clone()).send().await {
        Ok(resp) => match resp.bytes().await {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => {
                error!(url = %url, error = %err, "failed reading page body");
                None
            }
        },
        Err(err) => {
            error!(url = %url, error = %err, "failed loading page");
            None
        }
    }
}

/// Download `url` and save it under `dest_dir` using the original filename.
/// Returns the full path of the saved file.
///
/// Goes over a bare client so the archive bytes never enter the page
/// cache. The body is read in full before anything touches disk.
pub async fn download(
    client: &reqwest::Client,
    url: &Url,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let dest_dir = dest_dir.as_ref();
    let filename = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("download.zip");
    let dest_path = dest_dir.join(filename);

    let resp = client.get(url.clone()).send().await?.error_for_status()?;
    let bytes = resp.bytes().await?;

    fs::create_dir_all(dest_dir).await?;
    fs::write(&dest_path, &bytes).await?;

    Ok(dest_path)
}
