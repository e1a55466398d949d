//! Order Tracking API HTTP Client
//!
//! Wraps a single reqwest client configured with the per-call timeout and
//! exposes the request primitive every scenario goes through. Transport
//! failures never escape as errors; they are folded into the outcome so the
//! suite keeps running.

use anyhow::{Context, Result};
use log::debug;
use serde_json::{json, Value};
use std::time::Duration;

pub mod types;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Outcome of one API call.
///
/// `success` reflects only the expected-status check; body content is judged
/// by the calling scenario.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub success: bool,
    pub body: Value,
}

impl RequestOutcome {
    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            body: json!({ "error": message.into() }),
        }
    }
}

/// HTTP client for the order tracking REST API
pub struct ApiClient {
    /// Base URL of the service (e.g. "https://tracker.example.com")
    base_url: String,
    /// Derived API root ("{base_url}/api")
    api_url: String,
    /// HTTP client
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client against `base_url` with a fixed call timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            api_url: format!("{}/api", base_url),
            base_url,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one call against `{base_url}/api/{path}`.
    ///
    /// A bearer header is attached when `token` is given; the JSON
    /// content-type is always attached. `success` is exactly
    /// `status == expected_status`. Unsupported methods and network-level
    /// failures yield an `{"error": ...}` body without raising; response
    /// bodies that are not JSON degrade to `{"text": ..., "status_code": ...}`.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
        expected_status: u16,
    ) -> RequestOutcome {
        let method = match method.to_ascii_uppercase().as_str() {
            "GET" => reqwest::Method::GET,
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "DELETE" => reqwest::Method::DELETE,
            other => {
                return RequestOutcome::error(format!("unsupported method: {}", other));
            }
        };

        let url = format!("{}/{}", self.api_url, path);
        debug!("{} {} (expect {})", method, url, expected_status);

        let mut req = self
            .http
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => return RequestOutcome::error(e.to_string()),
        };

        let status = resp.status().as_u16();
        let success = status == expected_status;

        let raw = resp.text().await.unwrap_or_default();
        let body = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(_) => json!({ "text": raw, "status_code": status }),
        };

        RequestOutcome { success, body }
    }
}
