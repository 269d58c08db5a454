//! Backend responses.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Failure body the backend sends with non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// A buffered HTTP response. Header names are stored lowercased.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status. Handy for in-memory transports.
    pub fn json_value(status: u16, value: &serde_json::Value) -> Self {
        let headers = HashMap::from([("content-type".to_string(), "application/json".to_string())]);
        Self::new(status, headers, value.to_string().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body as UTF-8.
    pub fn text(&self) -> Result<&str, FetchError> {
        std::str::from_utf8(&self.body).map_err(|e| FetchError::Parse(format!("body is not UTF-8: {e}")))
    }

    /// Decode the body as JSON. A body that does not match `T` is a
    /// [`FetchError::Parse`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Failure reason: the `error` field of a JSON body, else the trimmed
    /// body, else the bare status.
    pub fn error_message(&self) -> String {
        if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&self.body) {
            return error;
        }
        self.text()
            .map(str::trim)
            .ok()
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("status {}", self.status))
    }

    /// Pass 2xx responses through; turn anything else into [`FetchError::Http`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Http {
            status: self.status,
            message: self.error_message(),
        })
    }
}
