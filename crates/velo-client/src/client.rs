// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the booking backend.
//!
//! Provides [`ApiClient`], which handles URL construction, bearer
//! authentication, error body decoding, and transient error retry for reads.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use velo_config::VeloConfig;
use velo_core::model::ApiErrorResponse;
use velo_core::{UserSession, VeloError};

/// Delay between a transient failure and the retry.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for the booking REST API.
///
/// Reads (`GET`) are retried on transient failures (transport errors, 429,
/// 5xx). Writes are sent exactly once so a booking is never created twice.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` (including the `/api` prefix).
    ///
    /// When the session carries a token it is sent as `Authorization: Bearer`
    /// on every request.
    pub fn new(
        base_url: &str,
        session: &UserSession,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, VeloError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &session.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                VeloError::Config(format!("invalid session token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VeloError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Creates a client from the `[api]` and `[session]` config sections.
    pub fn from_config(config: &VeloConfig) -> Result<Self, VeloError> {
        Self::new(
            &config.api.base_url,
            &config.session.to_user_session(),
            Duration::from_secs(config.api.timeout_secs),
            config.api.max_retries,
        )
    }

    /// Overrides the pause between retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET` a JSON resource, retrying transient failures.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, VeloError> {
        let mut attempt = 0;
        loop {
            match self.execute::<(), T>(Method::GET, path, None).await {
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(path, attempt, error = %err, "transient error, will retry");
                    tokio::time::sleep(self.retry_delay).await;
                }
                result => return result,
            }
        }
    }

    /// Sends a request with a JSON body once.
    pub(crate) async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, VeloError> {
        self.execute(method, path, Some(body)).await
    }

    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, VeloError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        debug!(%method, path, status = %status, "response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| VeloError::Decode {
                message: format!("{method} {path}: {e}"),
                source: Some(Box::new(e)),
            });
        }

        Err(error_from_response(status, &body))
    }

    fn transport_error(&self, err: reqwest::Error) -> VeloError {
        if err.is_timeout() {
            VeloError::Timeout {
                duration: self.timeout,
            }
        } else {
            VeloError::Http {
                message: format!("request failed: {err}"),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Maps a non-success response to an error, keeping the backend's message.
///
/// The backend sends `{status, message, timestamp}` for domain errors and a
/// flat `{field: message}` map for request validation failures.
fn error_from_response(status: StatusCode, body: &str) -> VeloError {
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        api_err.message
    } else if let Some(fields) = serde_json::from_str::<BTreeMap<String, String>>(body)
        .ok()
        .filter(|fields| !fields.is_empty())
    {
        fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ")
    } else if body.trim().is_empty() {
        format!("API returned {status}")
    } else {
        format!("API returned {status}: {}", body.trim())
    };

    if status == StatusCode::UNAUTHORIZED {
        VeloError::Unauthorized { message }
    } else {
        VeloError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
