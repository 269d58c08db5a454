//! Backend request builder.

use crate::kind::CallKind;
use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods used by the storefront API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request against the backend, relative to its base URL.
///
/// Paths are kept as segments so ids are escaped by the transport rather
/// than spliced into a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub kind: CallKind,
}

impl ApiRequest {
    /// Create a request for a static route such as `"/carts"` or `"orders/stats"`.
    pub fn new(method: Method, route: &str) -> Self {
        let kind = match method {
            Method::Get => CallKind::Catalog,
            _ => CallKind::CartWrite,
        };
        Self {
            method,
            segments: route
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
            kind,
        }
    }

    /// Create a GET request.
    pub fn get(route: &str) -> Self {
        Self::new(Method::Get, route)
    }

    /// Create a POST request.
    pub fn post(route: &str) -> Self {
        Self::new(Method::Post, route)
    }

    /// Create a PUT request.
    pub fn put(route: &str) -> Self {
        Self::new(Method::Put, route)
    }

    /// Create a DELETE request.
    pub fn delete(route: &str) -> Self {
        Self::new(Method::Delete, route)
    }

    /// Append one dynamic path segment (an id); it is escaped on send.
    pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
        self.segments.push(segment.as_ref().to_string());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the call kind, which picks the timeout budget.
    pub fn kind(mut self, kind: CallKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Parse the JSON body back, mainly for fakes and logging.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<Option<T>, FetchError> {
        self.body
            .as_deref()
            .map(serde_json::from_slice)
            .transpose()
            .map_err(FetchError::from)
    }

    /// Unescaped path, e.g. `/carts/abc/add`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Path segments as string slices, handy for matching.
    pub fn segment_strs(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }
}
