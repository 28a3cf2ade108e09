//! reqwest implementation of the backend contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use termx_kernel::{BackendClient, BackendError, BackendResult};
use termx_types::{CommandRequest, CommandResponse, FileTree, ProcessList, ProcessSample};

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Client for `base_url` with a per-request timeout. Trailing slashes on
    /// the URL are ignored.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        error = %e,
                        ?timeout,
                        "HTTP client setup failed, requests will not time out"
                    );
                    Client::new()
                }),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: Response,
        what: &str,
    ) -> BackendResult<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Unreachable(format!("read {what} body: {e}")))?;
        serde_json::from_slice(&body)
            .map_err(|e| BackendError::Malformed(format!("parse {what} response: {e}")))
    }
}

fn unreachable(e: reqwest::Error) -> BackendError {
    BackendError::Unreachable(e.to_string())
}

#[async_trait]
impl BackendClient for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_health(&self) -> bool {
        match self.client.get(self.url("/api/health")).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), "health check rejected");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    async fn execute_command(
        &self,
        command: &str,
        current_path: &str,
        file_system: &FileTree,
    ) -> BackendResult<CommandResponse> {
        let body = CommandRequest {
            command: command.to_string(),
            current_path: current_path.to_string(),
            file_system: file_system.clone(),
        };
        let resp = self
            .client
            .post(self.url("/api/command"))
            .json(&body)
            .send()
            .await
            .map_err(unreachable)?;
        Self::read_json(resp, "/api/command").await
    }

    async fn fetch_process_snapshot(&self) -> BackendResult<Vec<ProcessSample>> {
        let resp = self
            .client
            .get(self.url("/api/processes"))
            .send()
            .await
            .map_err(unreachable)?;
        let list: ProcessList = Self::read_json(resp, "/api/processes").await?;
        Ok(list.processes)
    }
}
