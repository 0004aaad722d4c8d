//! Snapshot sources
//!
//! Where the poller reads fresh protocol state from: a JSON or YAML document
//! on disk (fixtures, exports from an indexer) or an HTTP endpoint serving the
//! same JSON document.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::domain::{LiquityStoreState, SnapshotError};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid snapshot: {0}")]
    Invalid(#[from] SnapshotError),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Something that can produce the current protocol state
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<LiquityStoreState>;

    /// Short description for logs
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            other => Err(SourceError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn parse(&self, content: &str) -> Result<LiquityStoreState> {
        let state: LiquityStoreState = match self {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
        };
        state.validate()?;
        Ok(state)
    }
}

/// Re-reads a snapshot document from disk on every fetch
pub struct FileSnapshotSource {
    path: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = SnapshotFormat::from_path(&path)?;
        Ok(Self { path, format })
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<LiquityStoreState> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        debug!("Read {} bytes from {}", content.len(), self.path.display());
        self.format.parse(&content)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fetches a JSON snapshot over HTTP
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Use a preconfigured client (proxy settings, headers)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<LiquityStoreState> {
        let state: LiquityStoreState = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        state.validate()?;
        Ok(state)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML_SNAPSHOT: &str = r#"
protocol:
  price: "1800.5"
  numberOfTroves: 42
  total:
    collateral: "1000"
    debt: "600000"
  lusdInStabilityPool: "300000"
  borrowingRate: "0.005"
  redemptionRate: "0.005"
  totalStakedLQTY: "12345"
  frontend:
    status: unregistered
account:
  accountBalance: "2"
  lusdBalance: "0"
  lqtyBalance: "0"
  collateralSurplusBalance: "0.25"
  troveStatus: closedByLiquidation
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")).unwrap(), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")).unwrap(), SnapshotFormat::Yaml);
        assert!(matches!(
            SnapshotFormat::from_path(Path::new("a.toml")),
            Err(SourceError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_rate() {
        let content = YAML_SNAPSHOT.replace("borrowingRate: \"0.005\"", "borrowingRate: \"5\"");
        assert!(matches!(
            SnapshotFormat::Yaml.parse(&content),
            Err(SourceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_reads_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML_SNAPSHOT.as_bytes()).unwrap();

        let source = FileSnapshotSource::new(file.path()).unwrap();
        let state = source.fetch().await.unwrap();

        assert_eq!(state.protocol.number_of_troves, 42);
        assert_eq!(state.protocol.price.to_string(), "1800.5");
        assert!(!state.account.collateral_surplus_balance.is_zero());
    }

    const JSON_SNAPSHOT: &str = r#"{
        "protocol": {
            "blockTag": 17000000,
            "price": "1800.5",
            "numberOfTroves": 42,
            "total": { "collateral": "1000", "debt": "600000" },
            "lusdInStabilityPool": "300000",
            "borrowingRate": "0.005",
            "redemptionRate": "0.005",
            "totalStakedLQTY": "12345",
            "frontend": { "status": "registered", "kickbackRate": "0.8" }
        },
        "account": {
            "accountBalance": "2",
            "lusdBalance": "0",
            "lqtyBalance": "0"
        }
    }"#;

    /// Serve a single HTTP response on a local port, returning its URL
    async fn serve_once(status: &'static str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read the request head before answering
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/snapshot.json", addr)
    }

    fn http_source(url: String) -> HttpSnapshotSource {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpSnapshotSource::with_client(client, url)
    }

    #[test]
    fn test_http_source_new() {
        let source = HttpSnapshotSource::new("http://127.0.0.1:1/s.json", Duration::from_secs(1)).unwrap();
        assert_eq!(source.describe(), "http http://127.0.0.1:1/s.json");
    }

    #[tokio::test]
    async fn test_http_source_parses_json() {
        let url = serve_once("200 OK", JSON_SNAPSHOT.to_string()).await;
        let source = http_source(url.clone());
        assert_eq!(source.describe(), format!("http {}", url));

        let state = source.fetch().await.unwrap();
        assert_eq!(state.protocol.block_tag, Some(17000000));
        assert_eq!(state.protocol.number_of_troves, 42);
        assert_eq!(state.protocol.frontend.kickback_rate(), Some("0.8".parse().unwrap()));
        assert!(state.account.collateral_surplus_balance.is_zero());
    }

    #[tokio::test]
    async fn test_http_source_server_error() {
        let url = serve_once("500 Internal Server Error", "{}".to_string()).await;
        assert!(matches!(http_source(url).fetch().await, Err(SourceError::Http(_))));
    }

    #[tokio::test]
    async fn test_http_source_rejects_invalid_snapshot() {
        let body = JSON_SNAPSHOT.replace(r#""borrowingRate": "0.005""#, r#""borrowingRate": "5""#);
        let url = serve_once("200 OK", body).await;
        assert!(matches!(http_source(url).fetch().await, Err(SourceError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSnapshotSource::new("/nonexistent/snapshot.json").unwrap();
        assert!(matches!(source.fetch().await, Err(SourceError::Io(_))));
    }
}
