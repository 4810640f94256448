//! Resource handlers
//!
//! Each handler wraps the transport [`Client`] around one resource. They
//! share one pipeline: send the request, then on `200 OK` read the body
//! (at most 10 MiB) and decode it, and on any other status hand the body
//! to the [error classifier](crate::api_error). The response is consumed on
//! every branch, so no body outlives the call.
//!
//! # Examples
//!
//! ```no_run
//! use rust_yookassa::client::{Client, Context};
//! use rust_yookassa::handlers::PaymentHandler;
//! use rust_yookassa::types::{Amount, Confirmation, Payment};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> rust_yookassa::Result<()> {
//! let client = Client::new("123456", "test_secret")?;
//! let payments = PaymentHandler::new(client);
//!
//! let request = Payment::new(Amount::rub(Decimal::new(10000, 2)))
//!     .with_capture(true)
//!     .with_confirmation(Confirmation::redirect("https://shop.example/return"));
//!
//! let payment = payments.create_payment(&Context::background(), &request).await?;
//! let link = payments.parse_payment_link(&payment)?;
//! println!("send the payer to {}", link);
//! # Ok(())
//! # }
//! ```
//!
//! Retrying one logical operation safely means reusing its idempotency
//! key:
//!
//! ```no_run
//! # use rust_yookassa::client::{Client, Context};
//! # use rust_yookassa::handlers::RefundHandler;
//! # use rust_yookassa::types::{Amount, Refund};
//! # use rust_decimal::Decimal;
//! # async fn example(client: Client) -> rust_yookassa::Result<()> {
//! let refunds = RefundHandler::new(client).with_idempotency_key("order-72-refund");
//! let refund = Refund::new("payment-id", Amount::rub(Decimal::ONE));
//!
//! let ctx = Context::background();
//! let result = match refunds.create_refund(&ctx, &refund).await {
//!     Err(e) if e.is_transport() => refunds.create_refund(&ctx, &refund).await,
//!     other => other,
//! };
//! # result.map(|_| ())
//! # }
//! ```

pub mod payment;
pub mod payout;
pub mod refund;


pub use payment::{PaymentHandler, PAYMENT_ENDPOINT};
pub use payout::{PayoutHandler, PAYOUT_ENDPOINT};
pub use refund::{RefundHandler, REFUND_ENDPOINT};

use crate::api_error;
use crate::body::{read_capped, MAX_RESPONSE_BODY_BYTES};
use crate::client::{Client, Context, QueryParams};
use crate::{Result, YooKassaError};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Send one request and turn the response into `T` or a classified error
pub(crate) async fn execute<T: DeserializeOwned>(
    client: &Client,
    ctx: &Context,
    method: Method,
    endpoint: &str,
    body: Option<Vec<u8>>,
    params: Option<&QueryParams>,
    idempotency_key: Option<&str>,
) -> Result<T> {
    let response = client
        .make_request(ctx, method, endpoint, body, params, idempotency_key)
        .await?;
    ctx.run(decode_response(response)).await
}

/// Decode a `200 OK` body, classify anything else
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status() != StatusCode::OK {
        let err = api_error::classify(response).await?;
        return Err(YooKassaError::Api(err));
    }

    let body = read_capped(response, MAX_RESPONSE_BODY_BYTES).await?;
    body.decode()
}

/// Serialize a list filter into query parameters, dropping empty values
pub(crate) fn filter_params<F: Serialize>(filter: &F) -> Result<QueryParams> {
    let params = match serde_json::to_value(filter)? {
        Value::Object(map) => map,
        Value::Null => QueryParams::new(),
        _ => {
            return Err(YooKassaError::invalid_request(
                "List filter must serialize to a JSON object",
            ))
        }
    };

    Ok(params
        .into_iter()
        .filter(|(_, value)| !is_empty_value(value))
        .collect())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
