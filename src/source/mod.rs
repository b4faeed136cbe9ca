use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::LoadError;
use crate::models::Record;

/// Where the mapping dataset comes from. Fetched once per process start.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError>;

    fn describe(&self) -> String;
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn data_source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpDataSource::new(location))
    } else {
        Box::new(FileDataSource::new(location))
    }
}

pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| LoadError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!("read {} bytes from {}", bytes.len(), self.path.display());
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpDataSource {
    client: Client,
    url: String,
}

impl HttpDataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let http_err = |source| LoadError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().await.map_err(http_err)?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a fixed record set. Used by tests and for running without a dataset.
pub struct StaticDataSource {
    records: Vec<Record>,
}

impl StaticDataSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}
