//! Remote catalog fetching: cloud sharing links are rewritten to their
//! direct-download form, and fetched bytes are cached on disk keyed by the
//! SHA-256 of the rewritten URL.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::Result;

static DRIVE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"drive\.google\.com/file/d/([^/]+)/").unwrap());
static DRIVE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"drive\.google\.com/open\?id=([^&]+)").unwrap());

/// Rewrite cloud-storage sharing links to direct-download form. Anything
/// unrecognized passes through unchanged.
pub fn fix_cloud_link(url: &str) -> String {
    let url = url.trim();

    if let Some(caps) = DRIVE_FILE.captures(url) {
        return format!(
            "https://drive.google.com/uc?export=download&id={}",
            &caps[1]
        );
    }
    if let Some(caps) = DRIVE_OPEN.captures(url) {
        return format!(
            "https://drive.google.com/uc?export=download&id={}",
            &caps[1]
        );
    }

    if url.contains("dropbox.com") && !url.contains("raw=1") {
        if url.contains("dl=0") {
            return url.replace("dl=0", "raw=1");
        }
        let sep = if url.contains('?') { "&" } else { "?" };
        return format!("{url}{sep}raw=1");
    }

    if (url.contains("1drv.ms") || url.contains("onedrive.live.com"))
        && !url.contains("download=1")
    {
        let sep = if url.contains('?') { "&" } else { "?" };
        return format!("{url}{sep}download=1");
    }

    url.to_string()
}

fn cache_path(cache_dir: &Path, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hex = hex::encode(hasher.finalize());
    cache_dir.join("sha256").join(&hex[0..2]).join(&hex)
}

/// Fetch the bytes behind a URL, consulting and maintaining the on-disk
/// cache. The URL is rewritten before anything else, so the cache key is the
/// direct-download form.
pub fn fetch_bytes(url: &str, cache_dir: &Path) -> Result<Vec<u8>> {
    let url = fix_cloud_link(url);
    let path = cache_path(cache_dir, &url);
    if path.exists() {
        debug!(%url, cache = %path.display(), "catalog cache hit");
        return Ok(fs::read(&path)?);
    }

    info!(%url, "fetching catalog");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;
    let response = client.get(&url).send()?.error_for_status()?;
    let bytes = response.bytes()?.to_vec();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &bytes)?;
    debug!(cache = %path.display(), size = bytes.len(), "cached catalog bytes");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_file_page_becomes_direct_download() {
        let url = "https://drive.google.com/file/d/abc123/view?usp=sharing";
        assert_eq!(
            fix_cloud_link(url),
            "https://drive.google.com/uc?export=download&id=abc123"
        );
    }

    #[test]
    fn drive_open_link_becomes_direct_download() {
        let url = "https://drive.google.com/open?id=xyz&usp=drive";
        assert_eq!(
            fix_cloud_link(url),
            "https://drive.google.com/uc?export=download&id=xyz"
        );
    }

    #[test]
    fn dropbox_gains_raw_flag() {
        assert_eq!(
            fix_cloud_link("https://www.dropbox.com/s/abc/catalog.csv?dl=0"),
            "https://www.dropbox.com/s/abc/catalog.csv?raw=1"
        );
        assert_eq!(
            fix_cloud_link("https://www.dropbox.com/s/abc/catalog.csv"),
            "https://www.dropbox.com/s/abc/catalog.csv?raw=1"
        );
        // already direct, left alone
        let direct = "https://www.dropbox.com/s/abc/catalog.csv?raw=1";
        assert_eq!(fix_cloud_link(direct), direct);
    }

    #[test]
    fn onedrive_gains_download_flag() {
        assert_eq!(
            fix_cloud_link("https://1drv.ms/u/s!abc"),
            "https://1drv.ms/u/s!abc?download=1"
        );
    }

    #[test]
    fn plain_urls_pass_through() {
        let url = "https://example.com/catalog.csv";
        assert_eq!(fix_cloud_link(url), url);
        assert_eq!(fix_cloud_link("  https://example.com/x  "), "https://example.com/x");
    }

    #[test]
    fn cache_hit_skips_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://example.invalid/catalog.csv";
        let path = cache_path(dir.path(), url);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"a,b\n1,2\n").unwrap();
        // the host does not resolve, so this only succeeds via the cache
        let bytes = fetch_bytes(url, dir.path()).unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");
    }
}
