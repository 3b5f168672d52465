//! HTTP transport for GitHub requests.
//!
//! Uses ureq (sync HTTP); status codes are returned to the caller rather than raised,
//! since a 403 during a history walk means something different from any other failure.

use super::{ApiError, ApiResult};
use serde_json::Value;

const USER_AGENT: &str = concat!("readme-stats/", env!("CARGO_PKG_VERSION"));

/// Status, body and pagination link of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    /// Raw `Link` header, if any.
    pub link: Option<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Blocking request executor. Only network-level failures are errors.
pub trait Transport {
    fn post_json(&self, url: &str, body: &Value) -> ApiResult<HttpResponse>;
    fn get(&self, url: &str) -> ApiResult<HttpResponse>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
    token: String,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder().http_status_as_error(false).build().new_agent()
}

impl UreqTransport {
    pub fn new(token: impl Into<String>) -> Self {
        Self { agent: make_agent(), token: token.into() }
    }

    fn authorization(&self) -> String {
        format!("bearer {}", self.token)
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &Value) -> ApiResult<HttpResponse> {
        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.authorization())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send_json(body)
            .map_err(|e| ApiError::Network { url: url.to_string(), message: e.to_string() })?;
        read_response(url, response)
    }

    fn get(&self, url: &str) -> ApiResult<HttpResponse> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.authorization())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .call()
            .map_err(|e| ApiError::Network { url: url.to_string(), message: e.to_string() })?;
        read_response(url, response)
    }
}

fn read_response(url: &str, response: ureq::http::Response<ureq::Body>) -> ApiResult<HttpResponse> {
    let status = response.status().as_u16();
    let link = response
        .headers()
        .get("link")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    let body = response
        .into_body()
        .read_to_string()
        .map_err(|e| ApiError::Network { url: url.to_string(), message: e.to_string() })?;
    Ok(HttpResponse { status, body, link })
}
