//! HTTP transport for the Joyeria storefront backend.
//!
//! Requests are described as [`ApiRequest`] values and sent through the
//! [`Transport`] trait. [`FetchClient`] is the reqwest-backed
//! implementation; tests swap in an in-memory backend.
//!
//! Every call is tagged with a [`CallKind`], and [`send_timed`] bounds it
//! with the budget that [`TimeoutPolicy`] assigns to that kind.
//!
//! # Example
//!
//! ```rust,no_run
//! use joyeria_data::{send_timed, ApiRequest, CallKind, FetchClient, TimeoutPolicy};
//!
//! # async fn run() -> Result<(), joyeria_data::FetchError> {
//! let policy = TimeoutPolicy::default();
//! let client = FetchClient::new("http://127.0.0.1:5000")?.with_timeouts(&policy)?;
//!
//! let request = ApiRequest::get("/carts").segment("65a1f0c2").kind(CallKind::CartRead);
//! let cart: serde_json::Value = send_timed(&client, request, &policy)
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! # let _ = cart;
//! # Ok(())
//! # }
//! ```

mod error;
mod kind;
mod request;
mod response;
mod timeout;
mod transport;

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Url;

pub use error::FetchError;
pub use kind::CallKind;
pub use request::{ApiRequest, Method};
pub use response::Response;
pub use timeout::{send_timed, TimeoutPolicy};
pub use transport::Transport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        send_timed, ApiRequest, CallKind, FetchClient, FetchError, Method, Response,
        TimeoutPolicy, Transport,
    };
}

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Url,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            default_headers: HashMap::new(),
        })
    }

    /// Rebuild the underlying client with the connection timeout from `policy`.
    ///
    /// Total timeouts are not set here; they are applied per call kind by
    /// [`send_timed`].
    pub fn with_timeouts(mut self, policy: &TimeoutPolicy) -> Result<Self, FetchError> {
        self.http = reqwest::Client::builder()
            .connect_timeout(policy.connect)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(self)
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request's segments and query against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for FetchClient {
    async fn send(&self, request: ApiRequest) -> Result<Response, FetchError> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, %url, kind = request.kind.name(), "backend request");

        let mut builder = self.http.request(to_reqwest(request.method), url);
        for (key, value) in self.default_headers.iter().chain(request.headers.iter()) {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = resp.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "backend response");
        Ok(Response::new(status, headers, body))
    }
}
