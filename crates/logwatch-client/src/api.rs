//! HTTP client for the log API

use std::time::Duration;

use logwatch_types::LogInfo;
use reqwest::{Response, Url};
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Largest tail the bulk endpoint accepts
pub const MAX_TAIL: usize = 5000;

/// Largest tail the watch endpoint accepts
pub const MAX_WATCH_TAIL: usize = 100;

/// Timeout for one-shot requests. The watch stream has none.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct TailResponse {
    lines: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for `{base}/api/log*`
#[derive(Clone, Debug)]
pub struct LogApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl LogApiClient {
    /// Create a client for the given base URL, e.g. `http://localhost:8000`
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("logwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the last `tail` raw lines, oldest first
    pub async fn fetch_tail(&self, tail: usize) -> Result<Vec<String>> {
        let tail = tail.clamp(1, MAX_TAIL);
        let response = self
            .http
            .get(self.endpoint("/api/log"))
            .query(&[("tail", tail)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body = check_status(response).await?.bytes().await?;
        let parsed: TailResponse = serde_json::from_slice(&body)?;
        tracing::debug!(tail, lines = parsed.lines.len(), "fetched log tail");
        Ok(parsed.lines)
    }

    /// Fetch log file metadata
    pub async fn fetch_info(&self) -> Result<LogInfo> {
        let response = self
            .http
            .get(self.endpoint("/api/log/info"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body = check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Open the server-sent-events watch stream
    ///
    /// The returned response has a successful status; its body is the event
    /// stream.
    pub async fn open_watch(&self, tail: usize) -> Result<Response> {
        let tail = tail.min(MAX_WATCH_TAIL);
        let response = self
            .http
            .get(self.endpoint("/api/log/watch"))
            .query(&[("tail", tail)])
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        check_status(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into [`ClientError::Http`]
///
/// The server reports failures as `{"detail": "..."}`; anything else falls
/// back to the status reason.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(ClientError::Http {
        status: status.as_u16(),
        detail,
    })
}
