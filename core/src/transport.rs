//! Host-side executors that turn an `HttpRequest` into an `HttpResponse`.
//!
//! # Design
//! A transport only moves bytes. Every HTTP status, including 4xx and 5xx,
//! comes back as an `HttpResponse` so the client can apply its own
//! decode-on-success policy. Only the absence of a response is an error.
//! Bodies are read as bytes and converted lossily, so a body that is not
//! UTF-8 never turns an error status into an error. No retries happen here.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Blocking request executor.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Async request executor. Dropping the returned future abandons the request.
pub trait AsyncTransport {
    fn execute(&self, request: &HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so error
/// statuses are returned as data rather than `Err`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.path, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(request.path.as_str()),
        };
        builder = builder.header("user-agent", self.user_agent.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|err| {
            tracing::warn!(url = %request.path, error = %err, "transport failure");
            ApiError::transport(err)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let bytes = response.body_mut().read_to_vec().map_err(|err| {
            tracing::warn!(url = %request.path, status, error = %err, "failed to read response body");
            ApiError::transport(err)
        })?;

        tracing::debug!(url = %request.path, status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body: body_text(&bytes),
        })
    }
}

/// Async transport backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::transport)?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl AsyncTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        tracing::debug!(method = %request.method, url = %request.path, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.path.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let url = request.path.clone();

        async move {
            let response = builder.send().await.map_err(|err| {
                tracing::warn!(url = %url, error = %err, "transport failure");
                ApiError::transport(err)
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    let value = value.to_str().ok()?;
                    Some((name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let bytes = response.bytes().await.map_err(|err| {
                tracing::warn!(url = %url, status, error = %err, "failed to read response body");
                ApiError::transport(err)
            })?;

            tracing::debug!(url = %url, status, "received response");
            Ok(HttpResponse {
                status,
                headers,
                body: body_text(&bytes),
            })
        }
    }
}

/// Response text with invalid UTF-8 sequences replaced by U+FFFD.
fn body_text(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::debug!(len = bytes.len(), "response body is not valid UTF-8");
            text
        }
    }
}
