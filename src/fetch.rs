//! Getting the DICOM byte buffer from a URL or path.
//!
//! This is the I/O layer that runs strictly before decoding; its failures
//! are [`FetchError`]s and never reach the decoder.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Read the whole resource behind `url`.
///
/// `file://` URLs and plain paths are read from disk. `http://` and
/// `https://` URLs require the `http` feature.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    if let Some(path) = local_path(url) {
        return read_file(path).await;
    }
    match url.split_once("://") {
        Some((scheme @ ("http" | "https"), _)) => fetch_http(scheme, url).await,
        Some((scheme, _)) => Err(FetchError::UnsupportedScheme(scheme.to_string())),
        None => Err(FetchError::UnsupportedScheme(String::new())),
    }
}

/// The file system path behind a plain path or a `file://` URL.
///
/// Only the empty host and `localhost` are accepted for `file://` URLs.
pub fn local_path(url: &str) -> Option<PathBuf> {
    match url.split_once("://") {
        None => Some(PathBuf::from(url)),
        Some(("file", rest)) => {
            let path = rest.strip_prefix("localhost").unwrap_or(rest);
            path.starts_with('/').then(|| PathBuf::from(path))
        }
        Some(_) => None,
    }
}

async fn read_file(path: PathBuf) -> Result<Vec<u8>, FetchError> {
    debug!("Reading {}", path.display());
    tokio::fs::read(&path)
        .await
        .map_err(|source| FetchError::Io { path, source })
}

#[cfg(feature = "http")]
async fn fetch_http(_scheme: &str, url: &str) -> Result<Vec<u8>, FetchError> {
    debug!("Fetching {url}");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(not(feature = "http"))]
async fn fetch_http(scheme: &str, _url: &str) -> Result<Vec<u8>, FetchError> {
    Err(FetchError::UnsupportedScheme(scheme.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[tokio::test]
    async fn reads_plain_paths_and_file_urls() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
        let path = file.path();

        assert_eq!(fetch_bytes(path.to_str().unwrap()).await.unwrap(), vec![1, 2, 3]);
        let url = format!("file://{}", path.display());
        assert_eq!(fetch_bytes(&url).await.unwrap(), vec![1, 2, 3]);
        let url = format!("file://localhost{}", path.display());
        assert_eq!(fetch_bytes(&url).await.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn resolves_local_paths() {
        assert_eq!(local_path("ct.dcm"), Some(PathBuf::from("ct.dcm")));
        assert_eq!(local_path("file:///data/ct.dcm"), Some(PathBuf::from("/data/ct.dcm")));
        assert_eq!(
            local_path("file://localhost/data/ct.dcm"),
            Some(PathBuf::from("/data/ct.dcm"))
        );
        assert_eq!(local_path("file://pacs/data/ct.dcm"), None);
        assert_eq!(local_path("https://pacs/ct.dcm"), None);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = fetch_bytes("/definitely/not/here.dcm").await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn rejects_unknown_schemes() {
        let err = fetch_bytes("ftp://example.com/image.dcm").await.unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(ref s) if s == "ftp"));
    }
}
