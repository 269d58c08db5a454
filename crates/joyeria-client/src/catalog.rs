//! Read-only listings: products, categories and orders.

use std::cmp::Reverse;

use joyeria_commerce::catalog::{Category, Product};
use joyeria_commerce::checkout::{Order, OrderStats, OrderStatus};
use joyeria_commerce::{CategoryId, OrderId, ProductId};
use joyeria_data::{send_timed, ApiRequest, CallKind, TimeoutPolicy, Transport};
use serde::de::DeserializeOwned;

use crate::error::CartError;

/// Default size of the "most viewed" and "best sellers" lists.
pub const DEFAULT_HIGHLIGHT_LIMIT: usize = 6;

/// Client for the catalog and order listings.
pub struct CatalogClient<T> {
    transport: T,
    timeouts: TimeoutPolicy,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            timeouts: TimeoutPolicy::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.timeouts = timeouts;
        self
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, CartError> {
        let path = request.path();
        let response = send_timed(&self.transport, request.kind(CallKind::Catalog), &self.timeouts)
            .await?
            .error_for_status()?;
        let value = response.json()?;
        tracing::debug!(%path, "listing fetched");
        Ok(value)
    }

    /// All products, optionally limited to one category.
    pub async fn list_products(
        &self,
        category: Option<&CategoryId>,
    ) -> Result<Vec<Product>, CartError> {
        let mut request = ApiRequest::get("/products");
        if let Some(category) = category.filter(|c| !c.is_blank()) {
            request = request.query("category", category);
        }
        self.fetch(request).await
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product, CartError> {
        self.fetch(ApiRequest::get("/products").segment(id)).await
    }

    pub async fn most_viewed(&self, limit: usize) -> Result<Vec<Product>, CartError> {
        self.fetch(ApiRequest::get("/products/most-viewed").query("limit", limit))
            .await
    }

    pub async fn best_sellers(&self, limit: usize) -> Result<Vec<Product>, CartError> {
        self.fetch(ApiRequest::get("/products/best-sellers").query("limit", limit))
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CartError> {
        self.fetch(ApiRequest::get("/categories")).await
    }

    /// Orders, newest first, optionally filtered by status.
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, CartError> {
        let mut request = ApiRequest::get("/orders");
        if let Some(status) = status {
            request = request.query("status", status.as_str());
        }
        let mut orders: Vec<Order> = self.fetch(request).await?;
        orders.sort_by_key(|order| Reverse(order.placed_at()));
        Ok(orders)
    }

    pub async fn get_order(&self, id: &OrderId) -> Result<Order, CartError> {
        self.fetch(ApiRequest::get("/orders").segment(id)).await
    }

    /// Look an order up by its human-facing number (`ORD-000042`).
    ///
    /// The backend only indexes orders by id, so this scans the listing.
    pub async fn find_order(&self, order_number: &str) -> Result<Order, CartError> {
        let wanted = order_number.trim();
        if wanted.is_empty() {
            return Err(CartError::Validation("an order number is required".to_string()));
        }
        self.list_orders(None)
            .await?
            .into_iter()
            .find(|order| order.order_number.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CartError::NotFound(format!("Order {wanted} not found")))
    }

    pub async fn order_stats(&self) -> Result<OrderStats, CartError> {
        self.fetch(ApiRequest::get("/orders/stats")).await
    }
}
