//! Identifiers handed out by the backend.
//!
//! Most resources carry opaque Mongo object ids. Each kind gets its own
//! newtype so a `ProductId` cannot stand in for a `CartId`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for cart ids minted on the client.
pub const LOCAL_CART_PREFIX: &str = "cart_";

/// Length of the random suffix of a client-minted cart id.
const LOCAL_CART_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the id is empty or whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// A catalog product.
    ProductId
);
define_id!(
    /// A server-side cart, or a client-minted one (see [`CartId::generate`]).
    CartId
);
define_id!(
    /// A catalog category.
    CategoryId
);
define_id!(
    /// A stored order (not the human-facing `ORD-000001` number).
    OrderId
);

impl CartId {
    /// Mint a cart id on the client (`cart_` followed by 9 base36 chars).
    ///
    /// Used when the backend upserts carts on first add and no
    /// `POST /carts` round trip is wanted.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..LOCAL_CART_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{}{}", LOCAL_CART_PREFIX, suffix))
    }

    /// Whether this id was minted on the client.
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_CART_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_convert_from_strings() {
        let borrowed: ProductId = "65a1f0c2".into();
        let owned = ProductId::from(String::from("65a1f0c2"));
        assert_eq!(borrowed, owned);
        assert_eq!(CartId::new("c1").to_string(), "c1");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: ProductId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_id() {
        assert!(ProductId::new("  ").is_blank());
        assert!(!ProductId::new("p1").is_blank());
    }

    #[test]
    fn test_local_cart_id_shape() {
        let id = CartId::generate();
        assert!(id.is_local());
        let suffix = &id.as_str()[LOCAL_CART_PREFIX.len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_local_cart_ids_differ() {
        assert_ne!(CartId::generate(), CartId::generate());
    }

    #[test]
    fn test_server_cart_id_is_not_local() {
        assert!(!CartId::new("65a1f0c2e4b0a1b2c3d4e5f6").is_local());
    }
}
