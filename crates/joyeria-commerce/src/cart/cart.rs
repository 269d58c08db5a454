//! Cart snapshot and line item types.

use crate::cart::{CartTotals, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::{CartId, ProductId};
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Image shown for line items and products without a photo.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.jpg";

/// Check that a requested quantity is usable for an add.
pub fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// A cart snapshot as returned by `GET /carts/{id}`.
///
/// The server owns the cart. A `Cart` value is only ever a copy of the
/// last response and is replaced wholesale on each fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Cart identifier, when the backend echoes it.
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    /// Items in the cart, in server order.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// What [`Cart::normalize`] had to repair in a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Rows dropped because their quantity was not positive.
    pub dropped: usize,
    /// Rows folded into an earlier row for the same product.
    pub merged: usize,
}

impl NormalizeReport {
    /// True when the snapshot needed no repair.
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.merged == 0
    }
}

impl Cart {
    /// An empty cart with no known id.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Enforce the one-row-per-product invariant on a fetched snapshot.
    ///
    /// Rows with a non-positive quantity (residue of the old `-9999`
    /// delete sentinel) are dropped. Repeated rows for one product are
    /// folded into the first one with their quantities summed and capped
    /// at [`MAX_QUANTITY_PER_ITEM`].
    pub fn normalize(&mut self) -> NormalizeReport {
        let mut report = NormalizeReport::default();
        let mut kept: Vec<LineItem> = Vec::with_capacity(self.items.len());

        for item in self.items.drain(..) {
            if item.quantity <= 0 {
                report.dropped += 1;
                continue;
            }
            if let Some(existing) = kept.iter_mut().find(|i| i.product_id == item.product_id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                report.merged += 1;
                continue;
            }
            kept.push(item);
        }

        self.items = kept;
        report
    }

    /// Re-tag every line price with `currency`.
    ///
    /// Snapshot prices arrive as bare decimals and parse into the default
    /// currency; the storefront's configured currency is applied here.
    pub fn set_currency(&mut self, currency: Currency) {
        for item in &mut self.items {
            item.price.currency = currency;
        }
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for a product.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Compute subtotal, shipping and grand total for this snapshot.
    pub fn calculate_total(&self, policy: &ShippingPolicy) -> Result<CartTotals, CommerceError> {
        policy.calculate_total(&self.items)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Image reference, if the product has a photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            price,
            quantity,
            image: None,
        }
    }

    /// Attach an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Image to display, falling back to the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, qty: i64) -> LineItem {
        LineItem::new(ProductId::new(id), id, Money::new(price, Currency::BOB), qty)
    }

    #[test]
    fn test_snapshot_deserializes_backend_shape() {
        let json = r#"{
            "_id": "65a1f0c2",
            "items": [
                {"product_id": "p1", "name": "Anillo", "price": 100.0, "quantity": 2,
                 "image": "/static/images/products/1_anillo.jpg"},
                {"product_id": "p2", "name": "Collar", "price": 50, "quantity": 1}
            ]
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.id, Some(CartId::new("65a1f0c2")));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].price.amount_cents, 10000);
        assert_eq!(cart.items[1].image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_snapshot_without_items_is_empty() {
        let cart: Cart = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_normalize_coalesces_duplicates() {
        let mut cart = Cart {
            id: None,
            items: vec![item("p1", 1000, 1), item("p2", 500, 1), item("p1", 1000, 2)],
        };
        let report = cart.normalize();
        assert_eq!(report.merged, 1);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.get_item(&ProductId::new("p1")).unwrap().quantity, 3);
        assert_eq!(cart.items[0].product_id, ProductId::new("p1"));
    }

    #[test]
    fn test_normalize_drops_sentinel_rows() {
        let mut cart = Cart {
            id: None,
            items: vec![item("p1", 1000, -9999), item("p2", 500, 0), item("p3", 100, 1)],
        };
        let report = cart.normalize();
        assert_eq!(report.dropped, 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_normalize_caps_quantity() {
        let mut cart = Cart {
            id: None,
            items: vec![item("p1", 1, MAX_QUANTITY_PER_ITEM), item("p1", 1, 5)],
        };
        cart.normalize();
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_set_currency_retags_prices() {
        let mut cart: Cart = serde_json::from_str(
            r#"{"items": [{"product_id": "p1", "name": "Anillo", "price": 100.0, "quantity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(cart.items[0].price.currency, Currency::BOB);

        cart.set_currency(Currency::USD);

        assert_eq!(cart.items[0].price, Money::new(10000, Currency::USD));
        let totals = cart
            .calculate_total(&ShippingPolicy::flat(Money::new(1500, Currency::USD)))
            .unwrap();
        assert_eq!(totals.grand_total.display(), "$215.00");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert_eq!(validate_quantity(0), Err(CommerceError::InvalidQuantity(0)));
        assert_eq!(
            validate_quantity(-9999),
            Err(CommerceError::InvalidQuantity(-9999))
        );
        assert!(validate_quantity(MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_line_total_overflow() {
        let line = item("p1", i64::MAX, 2);
        assert_eq!(line.line_total(), Err(CommerceError::Overflow));
    }
}
