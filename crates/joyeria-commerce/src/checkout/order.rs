//! Order types.

use crate::error::CommerceError;
use crate::ids::{CartId, OrderId, ProductId};
use crate::money::{self, Money};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Payment method sent when the shopper does not pick one.
pub const DEFAULT_PAYMENT_METHOD: &str = "credit_card";

/// Order status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Payment approved, cart emptied server-side.
    Completed,
    /// Payment rejected; the cart is left intact.
    PaymentFailed,
    /// Awaiting a payment decision.
    #[default]
    Pending,
    /// Any status this client does not know.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::PaymentFailed => "payment_failed",
            OrderStatus::Pending => "pending",
            OrderStatus::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "Completed",
            OrderStatus::PaymentFailed => "Payment failed",
            OrderStatus::Pending => "Pending",
            OrderStatus::Unknown => "Unknown",
        }
    }

    /// Whether the payment went through.
    pub fn is_approved(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Parse a status filter value.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(OrderStatus::Completed),
            "payment_failed" => Some(OrderStatus::PaymentFailed),
            "pending" => Some(OrderStatus::Pending),
            _ => None,
        }
    }
}

/// Optional shopper contact details attached to an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderRequest {
    pub cart_id: CartId,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl OrderRequest {
    /// Build an order request, rejecting a blank payment method.
    pub fn new(cart_id: CartId, payment_method: impl Into<String>) -> Result<Self, CommerceError> {
        let payment_method = payment_method.into().trim().to_string();
        if payment_method.is_empty() {
            return Err(CommerceError::ValidationError(
                "payment method is required".to_string(),
            ));
        }
        Ok(Self {
            cart_id,
            payment_method,
            customer: None,
        })
    }

    /// Attach customer details; empty details are not sent.
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = (!customer.is_empty()).then_some(customer);
        self
    }
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    #[serde(default)]
    pub message: String,
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(with = "money::decimal", default)]
    pub total: Money,
}

/// A line of a stored order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(with = "money::decimal")]
    pub price: Money,
    pub quantity: i64,
    #[serde(with = "money::decimal", default)]
    pub subtotal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A stored order as listed by `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    pub order_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(with = "money::decimal", default)]
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_approved: bool,
    #[serde(default)]
    pub status: OrderStatus,
    /// Placement time as sent by the backend (ISO 8601, usually without offset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Parsed placement time, if the backend sent a recognizable date.
    pub fn placed_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}

/// Aggregates from `GET /orders/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    #[serde(default)]
    pub total_sales_count: u64,
    #[serde(with = "money::decimal", default)]
    pub total_revenue: Money,
    #[serde(default)]
    pub failed_payments: u64,
}
