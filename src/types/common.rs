//! Types shared by several resources

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form key/value pairs attached to a resource
pub type Metadata = HashMap<String, String>;

/// Monetary amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in currency units, sent as a string (e.g. `"100.00"`)
    pub value: Decimal,
    /// ISO-4217 currency code
    pub currency: String,
}

impl Amount {
    /// Create a new amount
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    /// Amount in Russian rubles
    pub fn rub(value: Decimal) -> Self {
        Self::new(value, currencies::RUB)
    }
}

/// Common currency codes
pub mod currencies {
    /// Russian ruble
    pub const RUB: &str = "RUB";
    /// US dollar
    pub const USD: &str = "USD";
    /// Euro
    pub const EUR: &str = "EUR";
}

/// Why a payment, refund or payout was canceled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    /// Who canceled it (`yoo_money`, `payment_network`, `merchant`, ...)
    pub party: String,
    /// Reason code (`expired_on_confirmation`, `insufficient_funds`, ...)
    pub reason: String,
}

/// Envelope returned by list endpoints
///
/// `next_cursor` is present when more items exist; pass it back in the
/// filter's `cursor` to fetch the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList<T> {
    /// Object type, `"list"`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Items of this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Cursor of the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> ResourceList<T> {
    /// Whether another page is available
    pub fn has_more(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_amount_serializes_value_as_string() {
        let amount = Amount::rub(Decimal::from_str("100.00").unwrap());
        let value = serde_json::to_value(&amount).unwrap();
        assert_eq!(value, json!({"value": "100.00", "currency": "RUB"}));
    }

    #[test]
    fn test_amount_accepts_string_value() {
        let amount: Amount =
            serde_json::from_value(json!({"value": "2.50", "currency": "RUB"})).unwrap();
        assert_eq!(amount.value, Decimal::new(250, 2));
    }

    #[test]
    fn test_list_envelope() {
        let list: ResourceList<serde_json::Value> = serde_json::from_value(json!({
            "type": "list",
            "items": [{"id": "1"}, {"id": "2"}],
            "next_cursor": "abc"
        }))
        .unwrap();
        assert_eq!(list.kind, "list");
        assert_eq!(list.items.len(), 2);
        assert!(list.has_more());

        let empty: ResourceList<serde_json::Value> =
            serde_json::from_value(json!({"type": "list"})).unwrap();
        assert!(empty.items.is_empty());
        assert!(!empty.has_more());
    }
}
