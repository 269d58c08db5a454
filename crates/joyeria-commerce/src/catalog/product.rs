//! Product types.

use crate::cart::PLACEHOLDER_IMAGE;
use crate::ids::{CategoryId, ProductId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Product type the backend assigns when none is given.
pub const DEFAULT_PRODUCT_TYPE: &str = "joya";

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "money::decimal")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "type", default = "default_product_type")]
    pub kind: String,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Free-form attributes (metal, stone, size...).
    #[serde(default)]
    pub characteristics: serde_json::Value,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub purchases: u64,
}

fn default_product_type() -> String {
    DEFAULT_PRODUCT_TYPE.to_string()
}

impl Product {
    /// First photo, or the placeholder image.
    pub fn primary_photo(&self) -> &str {
        self.photos
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Whether the product belongs to the given category.
    pub fn in_category(&self, category: &CategoryId) -> bool {
        self.category_id.as_ref() == Some(category)
    }

    /// Characteristics as `key: value` pairs for display.
    pub fn characteristic_pairs(&self) -> Vec<(String, String)> {
        match &self.characteristics {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
