//! Store administration: category writes and record deletion.

use std::sync::Arc;

use joyeria_commerce::catalog::{CategoryUpdate, NewCategory};
use joyeria_commerce::{CategoryId, OrderId, ProductId};
use joyeria_data::{send_timed, ApiRequest, CallKind, Response, TimeoutPolicy, Transport};
use serde::Deserialize;

use crate::error::CartError;
use crate::ui::{AutoConfirm, Confirm};

#[derive(Deserialize)]
struct Created {
    id: CategoryId,
}

/// Client for the admin dashboard's write operations.
///
/// Deletions ask for confirmation first and send nothing when declined.
/// The backend refuses to delete a category that still has products; that
/// surfaces as [`CartError::Rejected`] with the backend's message.
pub struct AdminClient<T> {
    transport: T,
    timeouts: TimeoutPolicy,
    confirm: Arc<dyn Confirm>,
}

impl<T: Transport> AdminClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            timeouts: TimeoutPolicy::default(),
            confirm: Arc::new(AutoConfirm::default()),
        }
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    async fn call(&self, request: ApiRequest) -> Result<Response, CartError> {
        let request = request.kind(CallKind::Catalog);
        let response = send_timed(&self.transport, request, &self.timeouts).await?;
        Ok(response.error_for_status()?)
    }

    /// Create a category and return its id.
    pub async fn create_category(&self, category: &NewCategory) -> Result<CategoryId, CartError> {
        let request = ApiRequest::post("/categories").json(category)?;
        let created: Created = self.call(request).await?.json()?;
        tracing::info!(category_id = %created.id, name = %category.name, "category created");
        Ok(created.id)
    }

    pub async fn update_category(
        &self,
        id: &CategoryId,
        update: &CategoryUpdate,
    ) -> Result<(), CartError> {
        update.validate()?;
        let request = ApiRequest::put("/categories").segment(id).json(update)?;
        self.call(request).await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(())
    }

    /// Returns `Ok(false)` when the admin declined.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<bool, CartError> {
        let prompt = format!("Delete category {id}?");
        self.delete(ApiRequest::delete("/categories").segment(id), &prompt)
            .await
    }

    /// Returns `Ok(false)` when the admin declined.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, CartError> {
        let prompt = format!("Delete product {id} and its photos?");
        self.delete(ApiRequest::delete("/products").segment(id), &prompt)
            .await
    }

    /// Returns `Ok(false)` when the admin declined.
    pub async fn delete_order(&self, id: &OrderId) -> Result<bool, CartError> {
        let prompt = format!("Delete order record {id}?");
        self.delete(ApiRequest::delete("/orders").segment(id), &prompt)
            .await
    }

    async fn delete(&self, request: ApiRequest, prompt: &str) -> Result<bool, CartError> {
        if request.segments.last().map_or(true, |id| id.trim().is_empty()) {
            return Err(CartError::Validation("an id is required".to_string()));
        }
        if !self.confirm.confirm(prompt) {
            return Ok(false);
        }
        let path = request.path();
        self.call(request).await?;
        tracing::info!(%path, "record deleted");
        Ok(true)
    }
}
