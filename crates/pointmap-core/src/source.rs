//! Where the raw point payload comes from.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pointmap_common::{PointMapError, PointMapResult};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Trait for anything that can produce the raw JSON point payload.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch and decode the payload. The result is always a JSON array.
    async fn fetch(&self) -> PointMapResult<Value>;

    /// Human-readable location, used in logs and status output.
    fn location(&self) -> String;
}

/// Fetches the payload over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> PointMapResult<Self> {
        // No overall request timeout: a stalled fetch stays in the loading state.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PointMapError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> PointMapResult<Value> {
        debug!("Requesting point data");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PointMapError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PointMapError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PointMapError::Network(e.to_string()))?;

        info!(bytes = body.len(), "Fetched point data");
        parse_payload(&body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads the payload from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> PointMapResult<Value> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            PointMapError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        info!(bytes = body.len(), "Read point data");
        parse_payload(&body)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source for a configured location: URLs go over HTTP, anything else
/// is a file path.
pub fn source_for(location: &str) -> PointMapResult<Arc<dyn DatasetSource>> {
    if is_http_location(location) {
        Ok(Arc::new(HttpSource::new(location)?))
    } else {
        Ok(Arc::new(FileSource::new(location)))
    }
}

fn is_http_location(location: &str) -> bool {
    let scheme = location
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    matches!(scheme.as_deref(), Some("http" | "https"))
}

/// Decode a body, requiring a JSON array at the top level.
pub fn parse_payload(body: &[u8]) -> PointMapResult<Value> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_array() {
        return Err(PointMapError::MalformedPayload(
            "expected a JSON array at the top level".to_string(),
        ));
    }
    Ok(value)
}
