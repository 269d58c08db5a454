//! Monetary amounts.
//!
//! Prices are held as integer centavos so that cart totals add up exactly.
//! The backend speaks decimal floats; [`decimal`] converts at the serde
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minor units per major unit. Both supported currencies use two decimals.
const MINOR_PER_MAJOR: i64 = 100;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Bolivian boliviano, the storefront's pricing currency.
    #[default]
    BOB,
    USD,
}

impl Currency {
    /// ISO code, e.g. `BOB`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BOB => "BOB",
            Currency::USD => "USD",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Currency::BOB => "Bs ",
            Currency::USD => "$",
        }
    }

    /// Parse an ISO code or the local `Bs` abbreviation, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOB" | "BS" => Ok(Currency::BOB),
            "USD" => Ok(Currency::USD),
            other => Err(format!("unsupported currency '{other}'")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Centavos (or cents).
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Build from a decimal amount, rounding to the nearest centavo.
    ///
    /// ```
    /// use joyeria_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_decimal(49.99, Currency::BOB).amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * MINOR_PER_MAJOR as f64).round() as i64, currency)
    }

    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / MINOR_PER_MAJOR as f64
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Amount with two decimals and no symbol, e.g. `265.00`.
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        format!("{sign}{}.{:02}", abs / per, abs % per)
    }

    /// Amount with the currency prefix, e.g. `Bs 265.00`.
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.prefix(), self.display_amount())
    }

    /// `None` when the currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        (self.currency == other.currency)
            .then(|| self.amount_cents.checked_add(other.amount_cents))
            .flatten()
            .map(|cents| Money::new(cents, self.currency))
    }

    /// `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let cents = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(cents, self.currency))
    }

    /// Sum amounts that must all be in `currency`.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Serde adapter for the backend's decimal price fields (`"price": 120.5`).
///
/// Numeric strings are accepted on input. Values land in the default
/// currency.
///
/// ```
/// use joyeria_commerce::money::Money;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(with = "joyeria_commerce::money::decimal")]
///     price: Money,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"price": 120.5}"#).unwrap();
/// assert_eq!(row.price.amount_cents, 12050);
/// ```
pub mod decimal {
    use super::{Currency, Money};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = match Wire::deserialize(deserializer)? {
            Wire::Number(n) => n,
            Wire::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid decimal amount: {s:?}")))?,
        };
        if !amount.is_finite() {
            return Err(de::Error::custom("amount must be finite"));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}
