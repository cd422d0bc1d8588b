//! Raw document sources: the site directory or a remote base URL

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::SourceError;

/// Fetches raw documents by site-relative path (`posts/posts.json`,
/// `posts/<id>.md`)
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, SourceError>;

    /// Human readable location, for logging
    fn describe(&self) -> String;
}

/// Reject paths that could leave the content root
fn check_relative(path: &str) -> Result<(), SourceError> {
    let invalid = path.is_empty()
        || Path::new(path)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

    if invalid {
        return Err(SourceError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Documents read from a local site directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ContentSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String, SourceError> {
        check_relative(path)?;
        let full_path = self.root.join(path);
        tracing::debug!("Reading {:?}", full_path);

        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SourceError::NotFound {
                    path: path.to_string(),
                },
                _ => SourceError::Io {
                    path: full_path,
                    source: e,
                },
            })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Documents fetched with HTTP GET relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, SourceError> {
        check_relative(path)?;
        let url = self.url_for(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
