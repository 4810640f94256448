//! Payout resource types

use super::common::{Amount, CancellationDetails, Metadata, ResourceList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payout status as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Succeeded,
    Canceled,
    /// A status this client does not know yet, kept verbatim
    #[serde(untagged)]
    Unknown(String),
}

/// Card details of a bank card destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
}

/// Where a payout is sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayoutDestination {
    /// Bank card, identified by a payout token or card details
    BankCard {
        #[serde(skip_serializing_if = "Option::is_none")]
        card: Option<PayoutCard>,
    },
    /// YooMoney wallet
    YooMoney {
        #[serde(skip_serializing_if = "Option::is_none")]
        account_number: Option<String>,
    },
    /// Faster Payments System transfer
    Sbp {
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bank_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        recipient_checked: Option<bool>,
    },
    /// A destination type this client does not know yet, kept verbatim
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

/// A payout from the shop's balance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Payout identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Amount to pay out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Current status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PayoutStatus>,
    /// Destination for a new payout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_destination_data: Option<PayoutDestination>,
    /// Destination as reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_destination: Option<PayoutDestination>,
    /// Tokenized card from the payout widget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_token: Option<String>,
    /// Saved payment method to pay out to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    /// Description shown to the recipient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Whether this is a test payout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    /// Why the payout was canceled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    /// Shop-defined metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Payout {
    /// Pay `amount` out to `destination`
    pub fn new(amount: Amount, destination: PayoutDestination) -> Self {
        Self {
            amount: Some(amount),
            payout_destination_data: Some(destination),
            ..Self::default()
        }
    }

    /// Pay `amount` out to a tokenized card
    pub fn to_token(amount: Amount, payout_token: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            payout_token: Some(payout_token.into()),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// List of payouts
pub type PayoutList = ResourceList<Payout>;

/// Filter for listing payouts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayoutListFilter {
    #[serde(rename = "created_at.gte", skip_serializing_if = "Option::is_none")]
    pub created_at_gte: Option<DateTime<Utc>>,
    #[serde(rename = "created_at.gt", skip_serializing_if = "Option::is_none")]
    pub created_at_gt: Option<DateTime<Utc>>,
    #[serde(rename = "created_at.lte", skip_serializing_if = "Option::is_none")]
    pub created_at_lte: Option<DateTime<Utc>>,
    #[serde(rename = "created_at.lt", skip_serializing_if = "Option::is_none")]
    pub created_at_lt: Option<DateTime<Utc>>,
    /// Destination type (`bank_card`, `yoo_money`, `sbp`)
    #[serde(rename = "payout_destination.type", skip_serializing_if = "Option::is_none")]
    pub payout_destination_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PayoutStatus>,
    /// Page size (1-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page cursor from a previous list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_payout_to_wallet() {
        let payout = Payout::new(
            Amount::rub(Decimal::new(32000, 2)),
            PayoutDestination::YooMoney {
                account_number: Some("4100116075156746".to_string()),
            },
        );
        assert_eq!(
            serde_json::to_value(&payout).unwrap(),
            json!({
                "amount": {"value": "320.00", "currency": "RUB"},
                "payout_destination_data": {"type": "yoo_money", "account_number": "4100116075156746"}
            })
        );
    }

    #[test]
    fn test_payout_response() {
        let payout: Payout = serde_json::from_value(json!({
            "id": "po-285e5ee7-0022-5000-8000-01516a44b147",
            "amount": {"value": "320.00", "currency": "RUB"},
            "status": "succeeded",
            "payout_destination": {
                "type": "bank_card",
                "card": {"first6": "220220", "last4": "2537", "card_type": "MIR"}
            },
            "created_at": "2021-06-21T16:22:50.512Z",
            "test": false
        }))
        .unwrap();

        assert_eq!(payout.status, Some(PayoutStatus::Succeeded));
        match payout.payout_destination {
            Some(PayoutDestination::BankCard { card: Some(card) }) => {
                assert_eq!(card.last4.as_deref(), Some("2537"));
            }
            other => panic!("unexpected destination: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_and_destination_are_kept() {
        let wire = json!({
            "id": "po-1",
            "status": "waiting_for_review",
            "payout_destination": {"type": "crypto_wallet", "address": "w-1"}
        });
        let payout: Payout = serde_json::from_value(wire.clone()).unwrap();

        assert_eq!(
            payout.status,
            Some(PayoutStatus::Unknown("waiting_for_review".to_string()))
        );
        assert!(matches!(
            payout.payout_destination,
            Some(PayoutDestination::Unknown(_))
        ));
        assert_eq!(serde_json::to_value(&payout).unwrap(), wire);
    }
}
