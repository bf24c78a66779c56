use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{ModelSummaryRecord, QuestionRecord};

pub const DETAILED_FILE: &str = "detailed.json";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the JSON documents live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn describe(&self, file: &str) -> String {
        match self {
            DataSource::Dir(dir) => dir.join(file).display().to_string(),
            DataSource::Url(base) => join_url(base, file),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Dir(dir) => write!(f, "{}", dir.display()),
            DataSource::Url(base) => f.write_str(base),
        }
    }
}

/// Outcome of a single load. A failure is a value to present, not a panic.
#[derive(Debug)]
pub enum LoadState<T> {
    Loaded(Vec<T>),
    Failed(LoadError),
}

impl<T> LoadState<T> {
    pub fn records(&self) -> &[T] {
        match self {
            LoadState::Loaded(records) => records,
            LoadState::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Loaded(_) => None,
            LoadState::Failed(e) => Some(e),
        }
    }
}

impl<T> From<Result<Vec<T>, LoadError>> for LoadState<T> {
    fn from(result: Result<Vec<T>, LoadError>) -> Self {
        match result {
            Ok(records) => LoadState::Loaded(records),
            Err(e) => LoadState::Failed(e),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Loader {
    source: DataSource,
    timeout: Duration,
}

impl Loader {
    pub fn new(source: DataSource, timeout_seconds: u64) -> Self {
        Self {
            source,
            timeout: Duration::from_secs(timeout_seconds.max(1)),
        }
    }

    pub async fn load_questions(&self) -> LoadState<QuestionRecord> {
        self.load_document(DETAILED_FILE).await
    }

    pub async fn load_summaries(&self) -> LoadState<ModelSummaryRecord> {
        self.load_document(SUMMARY_FILE).await
    }

    async fn load_document<T: DeserializeOwned>(&self, file: &str) -> LoadState<T> {
        let location = self.source.describe(file);
        tracing::debug!(%location, "loading document");
        let result = match self.fetch_bytes(file).await {
            Ok(bytes) => parse_records(&bytes, &location),
            Err(e) => Err(e),
        };
        match &result {
            Ok(records) => tracing::info!(%location, records = records.len(), "loaded"),
            Err(e) => tracing::warn!(%location, "load failed: {e}"),
        }
        result.into()
    }

    async fn fetch_bytes(&self, file: &str) -> Result<Vec<u8>, LoadError> {
        match &self.source {
            DataSource::Dir(dir) => read_file(&dir.join(file)).await,
            DataSource::Url(base) => fetch_url(base, file, self.timeout).await,
        }
    }
}

pub fn parse_records<T: DeserializeOwned>(bytes: &[u8], location: &str) -> Result<Vec<T>, LoadError> {
    serde_json::from_slice::<Vec<T>>(bytes).map_err(|e| LoadError::Parse {
        location: location.to_string(),
        source: e,
    })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        source: e,
    })
}

fn join_url(base: &str, file: &str) -> String {
    let mut out = base.trim().to_string();
    if !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(file.trim_start_matches('/'));
    out
}

async fn fetch_url(base: &str, file: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let base_url = reqwest::Url::parse(base).map_err(|_| LoadError::InvalidUrl {
        url: base.to_string(),
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::InvalidUrl {
            url: base.to_string(),
        });
    }
    let url = join_url(base, file);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LoadError::HttpClientBuild { source: e })?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| LoadError::Request {
            url: url.clone(),
            source: e,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url,
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(|e| LoadError::Request {
        url: url.clone(),
        source: e,
    })?;
    Ok(body.to_vec())
}
