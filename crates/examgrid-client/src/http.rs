//! HTTP implementation of the scheduler client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use examgrid_core::schedule::{ScheduleConfig, ScheduleResponse, UploadResponse};

use crate::client::{SchedulerClient, UploadFile};
use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Talks to the scheduler's `/api/upload` and `/api/schedule` endpoints.
pub struct HttpSchedulerClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSchedulerClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ClientError::NetworkError(format!(
                "scheduler not reachable at {}: {e}",
                self.base_url
            ))
        } else {
            ClientError::NetworkError(e.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status,
                message: error_detail(&body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse response: {e}")))
    }
}

/// Pull the human-readable message out of an error body.
///
/// The scheduler reports errors as `{"detail": ...}` where `detail` is a
/// string or, for validation failures, a list of objects with a `msg`.
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.get("msg")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl SchedulerClient for HttpSchedulerClient {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, file), fields(filename = %file.filename, bytes = file.content.len()))]
    async fn upload(&self, file: &UploadFile) -> anyhow::Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(file.content.clone())
            .file_name(file.filename.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let upload: UploadResponse = Self::decode(response).await?;
        info!(
            students = upload.total_students,
            subjects = upload.subjects.len(),
            "roster uploaded"
        );
        Ok(upload)
    }

    #[instrument(skip(self, config), fields(start = %config.start_date, end = %config.end_date))]
    async fn schedule(&self, config: &ScheduleConfig) -> anyhow::Result<ScheduleResponse> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/api/schedule", self.base_url))
            .json(config)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let schedule: ScheduleResponse = Self::decode(response).await?;
        info!(
            rows = schedule.results.len(),
            warnings = schedule.warnings.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "schedule received"
        );
        Ok(schedule)
    }
}
