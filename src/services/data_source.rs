use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const CURRENT_PRICES_PATH: &str = "data/current-prices.json";
pub const PRICE_HISTORY_PATH: &str = "data/price-history.json";

/// A fetched resource before any JSON parsing.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub status: u16,
    pub body: String,
}

impl RawDocument {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where the monitor's JSON files are read from.
///
/// `Err` is reserved for transport failures; a missing resource is a
/// `RawDocument` with a non-success status.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<RawDocument, String>;

    fn describe(&self) -> String;
}

#[derive(Clone)]
pub struct HttpSource {
    http: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, String> {
        // relative paths resolve against the directory, keep the trailing slash
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&base).map_err(|e| format!("invalid DATA_BASE_URL {base_url}: {e}"))?;

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().map_err(|e| e.to_string())?;

        Ok(Self { http, base })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<RawDocument, String> {
        let url = self.base.join(path).map_err(|e| e.to_string())?;

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| e.to_string())?;

        Ok(RawDocument { status, body })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

#[derive(Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<RawDocument, String> {
        let file = self.root.join(path);

        match tokio::fs::read(&file).await {
            // bad bytes are left for the JSON parser to report
            Ok(bytes) => Ok(RawDocument::ok(String::from_utf8_lossy(&bytes))),
            Err(e) => {
                let status = match e.kind() {
                    ErrorKind::NotFound => 404,
                    ErrorKind::PermissionDenied => 403,
                    _ => 500,
                };
                tracing::debug!(file = %file.display(), error = %e, "document not readable");
                Ok(RawDocument { status, body: String::new() })
            }
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
