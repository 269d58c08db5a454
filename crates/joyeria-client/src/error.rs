//! Client error types.

use joyeria_commerce::CommerceError;
use joyeria_data::FetchError;
use thiserror::Error;

/// Broad failure category, used to pick how a failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached or did not answer in time.
    Network,
    /// The backend answered 404.
    NotFound,
    /// Rejected before any request was sent.
    Validation,
    /// The backend answered with another non-2xx status or an unusable body.
    Rejected,
    /// Another cart mutation is still in flight.
    Busy,
    /// The local cart id store failed.
    Storage,
}

/// Errors raised by the local cart id store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Corrupt store file {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Errors returned by [`CartClient`](crate::CartClient),
/// [`CatalogClient`](crate::CatalogClient) and
/// [`AdminClient`](crate::AdminClient) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Network error: {0}")]
    Network(FetchError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rejected by server (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Malformed(String),

    #[error("Another cart update is still in progress")]
    Busy,

    #[error("Cart id storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::Network(_) => ErrorKind::Network,
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::Validation(_) => ErrorKind::Validation,
            CartError::Rejected { .. } | CartError::Malformed(_) => ErrorKind::Rejected,
            CartError::Busy => ErrorKind::Busy,
            CartError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Short text suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            CartError::Network(FetchError::Timeout { .. }) => {
                "The store took too long to answer. Please try again.".to_string()
            }
            CartError::Network(_) => {
                "Could not reach the store. Check your connection and try again.".to_string()
            }
            CartError::NotFound(message) | CartError::Validation(message) => message.clone(),
            CartError::Rejected { message, .. } => message.clone(),
            CartError::Malformed(_) => "The store sent an unexpected response.".to_string(),
            CartError::Busy => "Please wait for the current cart update to finish.".to_string(),
            CartError::Storage(e) => format!("Could not save the cart locally: {e}"),
        }
    }
}

impl From<FetchError> for CartError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Http { status: 404, message } => CartError::NotFound(message),
            FetchError::Http { status, message } => CartError::Rejected { status, message },
            FetchError::Parse(message) | FetchError::Json(message) => CartError::Malformed(message),
            other => CartError::Network(other),
        }
    }
}

impl From<CommerceError> for CartError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::SerializationError(message) => CartError::Malformed(message),
            other => CartError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joyeria_data::CallKind;
    use std::time::Duration;

    #[test]
    fn test_fetch_error_mapping() {
        let not_found: CartError = FetchError::Http {
            status: 404,
            message: "Cart not found".into(),
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let rejected: CartError = FetchError::Http {
            status: 500,
            message: "Server error".into(),
        }
        .into();
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
        assert_eq!(rejected.user_message(), "Server error");

        let timeout: CartError = FetchError::Timeout {
            kind: CallKind::Checkout,
            after: Duration::from_secs(15),
        }
        .into();
        assert_eq!(timeout.kind(), ErrorKind::Network);

        let parse: CartError = FetchError::Parse("eof".into()).into();
        assert_eq!(parse.kind(), ErrorKind::Rejected);
    }

    #[test]
    fn test_commerce_error_is_validation() {
        let err: CartError = CommerceError::InvalidQuantity(0).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.user_message(), "Invalid quantity: 0");
    }
}
