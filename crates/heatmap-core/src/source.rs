//! Where the dataset and geometry are read from.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

/// A static resource, either a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Reads the whole resource into memory.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Path(path) => {
                debug!("Reading {}", path.display());
                Ok(tokio::fs::read(path).await?)
            }
            DataSource::Url(url) => {
                debug!("Fetching {}", url);
                let response = reqwest::get(url).await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl From<&str> for DataSource {
    fn from(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::Path(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}
