//! Payment handler

use super::{execute, filter_params};
use crate::client::{Client, Context};
use crate::path::{action_endpoint, item_endpoint};
use crate::types::{Payment, PaymentList, PaymentListFilter};
use crate::{Result, YooKassaError};
use reqwest::Method;

/// Collection endpoint of payments
pub const PAYMENT_ENDPOINT: &str = "payments";

const CAPTURE_ACTION: &str = "capture";
const CANCEL_ACTION: &str = "cancel";

/// Creates, finds, captures and cancels payments
#[derive(Debug, Clone)]
pub struct PaymentHandler {
    client: Client,
    idempotency_key: Option<String>,
}

impl PaymentHandler {
    /// Create a handler that generates a fresh idempotency key per write
    pub fn new(client: Client) -> Self {
        Self {
            client,
            idempotency_key: None,
        }
    }

    /// Copy of this handler that reuses `key` for every write
    pub fn with_idempotency_key(&self, key: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            idempotency_key: Some(key.into()),
        }
    }

    /// The pinned idempotency key, if any
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Create a payment
    ///
    /// The created payment must be usable: either it carries a
    /// confirmation for the payer, or the request charged a saved payment
    /// method. Otherwise [`YooKassaError::EmptyConfirmationUrl`] is
    /// returned.
    pub async fn create_payment(&self, ctx: &Context, payment: &Payment) -> Result<Payment> {
        let body = serde_json::to_vec(payment)?;
        let created: Payment = execute(
            &self.client,
            ctx,
            Method::POST,
            PAYMENT_ENDPOINT,
            Some(body),
            None,
            self.idempotency_key(),
        )
        .await?;

        if created.confirmation.is_none() && !payment.has_payment_method_id() {
            return Err(YooKassaError::EmptyConfirmationUrl);
        }

        tracing::debug!(payment_id = ?created.id, status = ?created.status, "Payment created");
        Ok(created)
    }

    /// Find a payment by id
    pub async fn find_payment(&self, ctx: &Context, id: &str) -> Result<Payment> {
        let endpoint = item_endpoint(PAYMENT_ENDPOINT, id)?;
        execute(&self.client, ctx, Method::GET, &endpoint, None, None, None).await
    }

    /// List payments matching `filter`
    pub async fn find_payments(
        &self,
        ctx: &Context,
        filter: &PaymentListFilter,
    ) -> Result<PaymentList> {
        let params = filter_params(filter)?;
        execute(
            &self.client,
            ctx,
            Method::GET,
            PAYMENT_ENDPOINT,
            None,
            Some(&params),
            None,
        )
        .await
    }

    /// Capture a `waiting_for_capture` payment
    ///
    /// `payment.id` selects the payment; the rest of `payment` is sent as
    /// the capture body (e.g. a partial `amount`).
    pub async fn capture_payment(&self, ctx: &Context, payment: &Payment) -> Result<Payment> {
        let id = payment
            .id
            .as_deref()
            .ok_or_else(|| YooKassaError::invalid_request("Payment id is required for capture"))?;
        let endpoint = action_endpoint(PAYMENT_ENDPOINT, id, CAPTURE_ACTION)?;
        let body = serde_json::to_vec(payment)?;

        execute(
            &self.client,
            ctx,
            Method::POST,
            &endpoint,
            Some(body),
            None,
            self.idempotency_key(),
        )
        .await
    }

    /// Cancel a `waiting_for_capture` payment
    pub async fn cancel_payment(&self, ctx: &Context, id: &str) -> Result<Payment> {
        let endpoint = action_endpoint(PAYMENT_ENDPOINT, id, CANCEL_ACTION)?;
        execute(
            &self.client,
            ctx,
            Method::POST,
            &endpoint,
            None,
            None,
            self.idempotency_key(),
        )
        .await
    }

    /// URL to send the payer to
    ///
    /// Only a redirect confirmation has one; any other confirmation, or
    /// none, yields [`YooKassaError::UnableToGetLink`].
    pub fn parse_payment_link(&self, payment: &Payment) -> Result<String> {
        payment
            .confirmation
            .as_ref()
            .and_then(|confirmation| confirmation.redirect_url())
            .map(str::to_string)
            .ok_or(YooKassaError::UnableToGetLink)
    }
}
