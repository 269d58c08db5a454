//! The seam between API clients and the wire.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::request::ApiRequest;
use crate::response::Response;

/// Sends [`ApiRequest`]s to the backend.
///
/// Implementations return every answered request as `Ok`, including
/// non-2xx ones; callers decide what a status means. Total timeouts are
/// applied by [`send_timed`](crate::send_timed), not here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}
