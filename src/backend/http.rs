use crate::backend::{Backend, ExtractionResult, FileContent, FileInventory, FileKind};
use crate::config::Config;
use crate::error::{classify_request_error, FileDeckError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Talks to the extraction backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeouts(base_url, None, None)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeouts(
            config.backend_url()?,
            config.request_timeout(),
            config.connect_timeout(),
        )
    }

    pub fn with_timeouts(
        base_url: Url,
        timeout: Option<Duration>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder.build().map_err(|e| FileDeckError::Network {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            connect_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint_url(&self.base_url, segments)
    }

    fn request_error(&self, label: &str, error: reqwest::Error) -> FileDeckError {
        classify_request_error(label, error, self.timeout, self.connect_timeout)
    }

    async fn send(&self, label: &str, request: RequestBuilder) -> Result<Response> {
        debug!(endpoint = label, "sending backend request");

        let response = request
            .send()
            .await
            .map_err(|e| self.request_error(label, e))?;

        let status = response.status();
        debug!(endpoint = label, status = status.as_u16(), "backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FileDeckError::BackendStatus {
                endpoint: label.to_string(),
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(&self, label: &str, response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(label, e))?;

        serde_json::from_slice(&bytes).map_err(|e| FileDeckError::MalformedResponse {
            endpoint: label.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_files(&self) -> Result<FileInventory> {
        let label = "GET /files";
        let url = self.endpoint(&["files"])?;
        let response = self.send(label, self.client.get(url)).await?;
        self.read_json(label, response).await
    }

    async fn start_extraction(&self) -> Result<ExtractionResult> {
        let label = "POST /extract";
        let url = self.endpoint(&["extract"])?;
        let response = self.send(label, self.client.post(url)).await?;
        self.read_json(label, response).await
    }

    async fn fetch_file(&self, kind: FileKind, filename: &str) -> Result<FileContent> {
        let label = format!("GET {}", kind.retrieval_path(filename));
        let url = self.endpoint(&["files", kind.segment(), filename])?;
        let response = self.send(&label, self.client.get(url)).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(&label, e))?
            .to_vec();

        Ok(FileContent {
            kind,
            filename: filename.to_string(),
            content_type,
            body,
        })
    }
}

/// Append path segments to `base`, percent-encoding each one.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FileDeckError::InvalidBackendUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Pull the `detail` string out of an error body, if there is one.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .map(|detail| detail.to_string())
}
