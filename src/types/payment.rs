//! Payment resource types

use super::common::{Amount, CancellationDetails, Metadata, ResourceList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, waiting for the payer
    Pending,
    /// Paid, waiting for capture or cancel
    WaitingForCapture,
    /// Paid and captured
    Succeeded,
    /// Canceled or failed
    Canceled,
    /// A status this client does not know yet, kept verbatim
    #[serde(untagged)]
    Unknown(String),
}

impl PaymentStatus {
    /// Whether the payment can no longer change status
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }
}

/// How the payer confirms the payment
///
/// Only [`Confirmation::Redirect`] produces a URL the payer can be sent to;
/// see [`PaymentHandler::parse_payment_link`](crate::handlers::PaymentHandler::parse_payment_link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Confirmation {
    /// Redirect the payer to `confirmation_url`
    Redirect {
        /// Set by the server once the payment is created
        #[serde(skip_serializing_if = "Option::is_none")]
        confirmation_url: Option<String>,
        /// Where the payer returns after confirming
        #[serde(skip_serializing_if = "Option::is_none")]
        return_url: Option<String>,
        /// Request 3-D Secure even when it could be skipped
        #[serde(skip_serializing_if = "Option::is_none")]
        enforce: Option<bool>,
        /// Language of the confirmation page
        #[serde(skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    /// Confirmation through the embeddable widget
    Embedded {
        /// Token for initializing the widget
        #[serde(skip_serializing_if = "Option::is_none")]
        confirmation_token: Option<String>,
    },
    /// Confirmation outside the payment flow (SMS, bank app)
    External {
        /// Language of notifications
        #[serde(skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    /// Confirmation in a mobile banking application
    MobileApplication {
        /// Deep link into the application
        #[serde(skip_serializing_if = "Option::is_none")]
        confirmation_url: Option<String>,
        /// Where the payer returns after confirming
        #[serde(skip_serializing_if = "Option::is_none")]
        return_url: Option<String>,
    },
    /// Confirmation by scanning a QR code
    Qr {
        /// Data to render as a QR code
        #[serde(skip_serializing_if = "Option::is_none")]
        confirmation_data: Option<String>,
    },
    /// A confirmation type this client does not know yet, kept verbatim
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl Confirmation {
    /// Redirect confirmation returning the payer to `return_url`
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Self::Redirect {
            confirmation_url: None,
            return_url: Some(return_url.into()),
            enforce: None,
            locale: None,
        }
    }

    /// Wire name of the confirmation type
    pub fn kind(&self) -> &str {
        match self {
            Self::Redirect { .. } => "redirect",
            Self::Embedded { .. } => "embedded",
            Self::External { .. } => "external",
            Self::MobileApplication { .. } => "mobile_application",
            Self::Qr { .. } => "qr",
            Self::Unknown(value) => value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// Confirmation URL of a redirect confirmation
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect {
                confirmation_url: Some(url),
                ..
            } if !url.is_empty() => Some(url),
            _ => None,
        }
    }
}

/// Payment method used or requested for a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Method type (`bank_card`, `yoo_money`, `sbp`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier of the saved method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the method was saved for recurring payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
    /// Human-readable title (e.g. masked card number)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PaymentMethod {
    /// Method of the given type, for `payment_method_data`
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            saved: None,
            title: None,
        }
    }
}

/// Payment recipient (shop and gateway)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Shop identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Gateway (subaccount) identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
}

/// A payment
///
/// Fields assigned by the server (`id`, `status`, timestamps, ...) are
/// `None` on a request and are never filled in locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Current status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Amount to charge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Amount credited to the shop after fees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Amount>,
    /// Amount refunded so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,
    /// Description shown to the payer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Payment recipient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,
    /// Requested payment method type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_data: Option<PaymentMethod>,
    /// Method actually used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Saved payment method to charge without confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    /// Save the method for recurring payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_payment_method: Option<bool>,
    /// Capture automatically once paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    /// How the payer confirms the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    /// Payer IP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Customer identifier in the shop's system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    /// Whether this is a test payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    /// Whether the payment has been paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    /// Whether the payment can be refunded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Capture time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Deadline for capture or cancel of a `waiting_for_capture` payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Why the payment was canceled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    /// Shop-defined metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Payment {
    /// A payment request for `amount`
    pub fn new(amount: Amount) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the confirmation
    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Set automatic capture
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Charge a saved payment method
    pub fn with_payment_method_id(mut self, payment_method_id: impl Into<String>) -> Self {
        self.payment_method_id = Some(payment_method_id.into());
        self
    }

    /// Request a specific payment method type
    pub fn with_payment_method_data(mut self, method: PaymentMethod) -> Self {
        self.payment_method_data = Some(method);
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether the payment references a saved payment method
    pub fn has_payment_method_id(&self) -> bool {
        self.payment_method_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

/// List of payments
pub type PaymentList = ResourceList<Payment>;

/// Filter for listing payments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentListFilter {
    /// Created at or after
    #[serde(rename = "created_at.gte", skip_serializing_if = "Option::is_none")]
    pub created_at_gte: Option<DateTime<Utc>>,
    /// Created after
    #[serde(rename = "created_at.gt", skip_serializing_if = "Option::is_none")]
    pub created_at_gt: Option<DateTime<Utc>>,
    /// Created at or before
    #[serde(rename = "created_at.lte", skip_serializing_if = "Option::is_none")]
    pub created_at_lte: Option<DateTime<Utc>>,
    /// Created before
    #[serde(rename = "created_at.lt", skip_serializing_if = "Option::is_none")]
    pub created_at_lt: Option<DateTime<Utc>>,
    /// Captured at or after
    #[serde(rename = "captured_at.gte", skip_serializing_if = "Option::is_none")]
    pub captured_at_gte: Option<DateTime<Utc>>,
    /// Captured after
    #[serde(rename = "captured_at.gt", skip_serializing_if = "Option::is_none")]
    pub captured_at_gt: Option<DateTime<Utc>>,
    /// Captured at or before
    #[serde(rename = "captured_at.lte", skip_serializing_if = "Option::is_none")]
    pub captured_at_lte: Option<DateTime<Utc>>,
    /// Captured before
    #[serde(rename = "captured_at.lt", skip_serializing_if = "Option::is_none")]
    pub captured_at_lt: Option<DateTime<Utc>>,
    /// Payment method type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Payment status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Page size (1-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page cursor from a previous list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl PaymentListFilter {
    /// Empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only payments with `status`
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from `cursor`
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Only payments created at or after `since`
    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_at_gte = Some(since);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_empty_payment_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Payment::default()).unwrap(), "{}");
    }

    #[test]
    fn test_payment_request_carries_no_server_fields() {
        let payment = Payment::new(Amount::rub(Decimal::new(10000, 2)))
            .with_capture(true)
            .with_confirmation(Confirmation::redirect("https://shop.example/return"))
            .with_description("Order 72")
            .with_metadata("order_id", "72");

        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(
            value,
            json!({
                "amount": {"value": "100.00", "currency": "RUB"},
                "capture": true,
                "confirmation": {"type": "redirect", "return_url": "https://shop.example/return"},
                "description": "Order 72",
                "metadata": {"order_id": "72"}
            })
        );
    }

    #[test]
    fn test_payment_response_decodes() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "22e12f66-000f-5000-8000-18db351245c7",
            "status": "waiting_for_capture",
            "paid": true,
            "amount": {"value": "2.00", "currency": "RUB"},
            "created_at": "2018-07-18T10:51:18.139Z",
            "confirmation": {
                "type": "redirect",
                "confirmation_url": "https://yoomoney.ru/checkout/payments/v2/contract?orderId=22e12f66"
            },
            "payment_method": {"type": "bank_card", "id": "22e12f66", "saved": false, "title": "Bank card *4444"},
            "recipient": {"account_id": "100500", "gateway_id": "100700"},
            "test": false,
            "refundable": false
        }))
        .unwrap();

        assert_eq!(payment.status, Some(PaymentStatus::WaitingForCapture));
        assert!(!payment.status.as_ref().unwrap().is_final());
        assert_eq!(
            payment.confirmation.as_ref().and_then(Confirmation::redirect_url),
            Some("https://yoomoney.ru/checkout/payments/v2/contract?orderId=22e12f66")
        );
        assert_eq!(payment.payment_method.unwrap().kind, "bank_card");
        assert!(payment.created_at.is_some());
    }

    #[test]
    fn test_unknown_status_and_confirmation_type_survive_reencoding() {
        let wire = json!({
            "id": "p1",
            "status": "on_hold",
            "confirmation": {"type": "sbp_link", "confirmation_url": "https://x"}
        });
        let payment: Payment = serde_json::from_value(wire.clone()).unwrap();

        assert_eq!(payment.status, Some(PaymentStatus::Unknown("on_hold".to_string())));
        let confirmation = payment.confirmation.as_ref().unwrap();
        assert_eq!(confirmation.kind(), "sbp_link");
        assert_eq!(confirmation.redirect_url(), None);

        assert_eq!(serde_json::to_value(&payment).unwrap(), wire);
    }

    #[test]
    fn test_known_status_still_decodes_to_its_variant() {
        let status: PaymentStatus = serde_json::from_value(json!("canceled")).unwrap();
        assert_eq!(status, PaymentStatus::Canceled);
        assert!(status.is_final());
        assert!(!PaymentStatus::Unknown("on_hold".to_string()).is_final());
    }

    #[test]
    fn test_confirmation_variants() {
        let embedded: Confirmation =
            serde_json::from_value(json!({"type": "embedded", "confirmation_token": "ct-1"})).unwrap();
        assert_eq!(embedded.kind(), "embedded");
        assert_eq!(embedded.redirect_url(), None);

        let qr: Confirmation =
            serde_json::from_value(json!({"type": "qr", "confirmation_data": "data"})).unwrap();
        assert_eq!(qr.kind(), "qr");

        let mobile: Confirmation = serde_json::from_value(
            json!({"type": "mobile_application", "confirmation_url": "bank://pay"}),
        )
        .unwrap();
        assert_eq!(mobile.redirect_url(), None);

        let redirect_without_url = Confirmation::redirect("https://shop.example");
        assert_eq!(redirect_without_url.redirect_url(), None);
    }

    #[test]
    fn test_filter_serialization_uses_dotted_names() {
        let filter = PaymentListFilter::new()
            .with_status(PaymentStatus::Succeeded)
            .with_limit(50)
            .created_since("2024-01-01T00:00:00Z".parse().unwrap());

        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            value,
            json!({
                "created_at.gte": "2024-01-01T00:00:00Z",
                "status": "succeeded",
                "limit": 50
            })
        );
    }
}
