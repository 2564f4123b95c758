//! [`HttpRequester`] — the `reqwest` implementation of [`Requester`].

use std::{fmt, time::Duration};

use reqwest::{Client, Url, header::LINK};
use rubric_core::{ApiRequest, ApiResponse, Endpoint, Method, Requester};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result, link_header, query};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for an LMS instance.
#[derive(Clone, Deserialize)]
pub struct HttpConfig {
  /// Instance root, e.g. `https://lms.example.com`. A trailing `/api/v1` is
  /// accepted too.
  pub base_url:     String,
  /// API access token, sent as a bearer token. Empty means anonymous.
  #[serde(default)]
  pub access_token: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

impl HttpConfig {
  pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
    Self {
      base_url:     base_url.into(),
      access_token: access_token.into(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl fmt::Debug for HttpConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HttpConfig")
      .field("base_url", &self.base_url)
      .field("access_token", &"<redacted>")
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}

// ─── Requester ────────────────────────────────────────────────────────────────

/// Async HTTP transport for the LMS REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpRequester {
  client:       Client,
  api_root:     Url,
  access_token: String,
}

impl HttpRequester {
  pub fn new(config: HttpConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      api_root: api_root(&config.base_url)?,
      access_token: config.access_token,
    })
  }

  /// The `.../api/v1/` URL relative paths are resolved against.
  pub fn api_root(&self) -> &Url { &self.api_root }

  fn url(&self, endpoint: &Endpoint) -> Result<Url> {
    match endpoint {
      Endpoint::Path(path) => self
        .api_root
        .join(path.trim_start_matches('/'))
        .map_err(|e| Error::InvalidUrl(format!("{path}: {e}"))),
      Endpoint::Absolute(url) => {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))
      }
    }
  }
}

fn api_root(base_url: &str) -> Result<Url> {
  let trimmed = base_url.trim_end_matches('/');
  let root = if trimmed.ends_with("/api/v1") {
    format!("{trimmed}/")
  } else {
    format!("{trimmed}/api/v1/")
  };
  Url::parse(&root).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))
}

fn http_method(method: Method) -> reqwest::Method {
  match method {
    Method::Get => reqwest::Method::GET,
    Method::Put => reqwest::Method::PUT,
    Method::Post => reqwest::Method::POST,
    Method::Delete => reqwest::Method::DELETE,
  }
}

impl Requester for HttpRequester {
  type Error = Error;

  async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
    let url = self.url(&request.endpoint)?;
    let mut builder = self.client.request(http_method(request.method), url.clone());

    if !self.access_token.is_empty() {
      builder = builder.bearer_auth(&self.access_token);
    }
    if request.method.has_body() {
      builder = builder.json(&request.params);
    } else if !request.params.is_empty() {
      builder = builder.query(&query::flatten(&request.params));
    }

    let resp = builder.send().await?;
    let status = resp.status();
    tracing::debug!(method = %request.method, %url, status = status.as_u16(), "lms request");

    let next = resp
      .headers()
      .get(LINK)
      .and_then(|v| v.to_str().ok())
      .and_then(link_header::next_url);
    let text = resp.text().await?;

    if !status.is_success() {
      return Err(Error::Status {
        status: status.as_u16(),
        body:   text,
      });
    }

    let body = if text.trim().is_empty() {
      Value::Null
    } else {
      serde_json::from_str(&text)?
    };
    Ok(ApiResponse { body, next })
  }
}
