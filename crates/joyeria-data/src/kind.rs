//! Call categories with their default time budgets.

use std::time::Duration;

/// What a backend call is for.
///
/// Each kind carries a default total timeout. Mutations get more room than
/// reads, checkout the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `GET /carts/{id}`.
    CartRead,
    /// Cart create, add, remove and clear.
    CartWrite,
    /// `POST /orders`.
    Checkout,
    /// Product, category and order listings.
    Catalog,
}

impl CallKind {
    /// All kinds, in config order.
    pub const ALL: [CallKind; 4] = [
        CallKind::CartRead,
        CallKind::CartWrite,
        CallKind::Checkout,
        CallKind::Catalog,
    ];

    /// Get the default total timeout for this kind of call.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::CartRead => Duration::from_secs(5),
            Self::CartWrite => Duration::from_secs(8),
            Self::Checkout => Duration::from_secs(15),
            Self::Catalog => Duration::from_secs(10),
        }
    }

    /// Whether calls of this kind change server state.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::CartWrite | Self::Checkout)
    }

    /// Get the name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CartRead => "cart_read",
            Self::CartWrite => "cart_write",
            Self::Checkout => "checkout",
            Self::Catalog => "catalog",
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_kinds() {
        assert!(CallKind::CartWrite.is_mutation());
        assert!(CallKind::Checkout.is_mutation());
        assert!(!CallKind::CartRead.is_mutation());
        assert!(!CallKind::Catalog.is_mutation());
    }

    #[test]
    fn test_checkout_has_largest_budget() {
        let max = CallKind::ALL
            .iter()
            .map(|k| k.default_timeout())
            .max()
            .unwrap();
        assert_eq!(max, CallKind::Checkout.default_timeout());
    }
}
