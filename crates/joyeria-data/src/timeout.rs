//! Timeout configuration for backend calls.

use std::time::Duration;

use crate::error::FetchError;
use crate::kind::CallKind;
use crate::request::ApiRequest;
use crate::response::Response;
use crate::transport::Transport;

/// Per-kind total timeouts plus the connection timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Connection timeout.
    pub connect: Duration,
    pub cart_read: Duration,
    pub cart_write: Duration,
    pub checkout: Duration,
    pub catalog: Duration,
}

impl TimeoutPolicy {
    /// Use the same total budget for every kind.
    pub fn uniform(total: Duration) -> Self {
        Self {
            connect: std::cmp::min(total, Self::default().connect),
            cart_read: total,
            cart_write: total,
            checkout: total,
            catalog: total,
        }
    }

    /// Total budget for a kind of call.
    pub fn for_kind(&self, kind: CallKind) -> Duration {
        match kind {
            CallKind::CartRead => self.cart_read,
            CallKind::CartWrite => self.cart_write,
            CallKind::Checkout => self.checkout,
            CallKind::Catalog => self.catalog,
        }
    }

    /// Override the budget for one kind.
    pub fn with(mut self, kind: CallKind, total: Duration) -> Self {
        match kind {
            CallKind::CartRead => self.cart_read = total,
            CallKind::CartWrite => self.cart_write = total,
            CallKind::Checkout => self.checkout = total,
            CallKind::Catalog => self.catalog = total,
        }
        self
    }

    /// Set the connection timeout.
    pub fn with_connect(mut self, connect: Duration) -> Self {
        self.connect = connect;
        self
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(3),
            cart_read: CallKind::CartRead.default_timeout(),
            cart_write: CallKind::CartWrite.default_timeout(),
            checkout: CallKind::Checkout.default_timeout(),
            catalog: CallKind::Catalog.default_timeout(),
        }
    }
}

/// Send a request, failing with [`FetchError::Timeout`] once the budget for
/// its kind runs out. The in-flight request is dropped at that point.
pub async fn send_timed<T>(
    transport: &T,
    request: ApiRequest,
    policy: &TimeoutPolicy,
) -> Result<Response, FetchError>
where
    T: Transport + ?Sized,
{
    let kind = request.kind;
    let after = policy.for_kind(kind);
    match tokio::time::timeout(after, transport.send(request)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(kind = kind.name(), timeout_ms = after.as_millis() as u64, "backend call timed out");
            Err(FetchError::Timeout { kind, after })
        }
    }
}
