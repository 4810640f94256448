//! # YooKassa Rust Client
//!
//! A typed, async client for the YooKassa payment API (v3).
//!
//! ## Features
//!
//! - **Payments**: create, find, list, capture and cancel payments, and extract
//!   the redirect link the payer must follow
//! - **Refunds**: create, find and list refunds
//! - **Payouts**: create, get and list payouts
//! - **Safe retries**: every write carries an `Idempotence-Key`, generated per
//!   call or pinned on the handler
//! - **Classified errors**: non-success responses become an [`ApiError`]; a
//!   malformed or oversize error body degrades to the `unexpected` code
//! - **Cancellation**: every call takes a [`Context`] carrying an optional
//!   deadline and cancellation token
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_yookassa::{Client, Context};
//! use rust_yookassa::handlers::PaymentHandler;
//! use rust_yookassa::types::{Amount, Confirmation, Payment};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("123456", "test_secret_key")?;
//!     let payments = PaymentHandler::new(client);
//!
//!     let request = Payment::new(Amount::rub(Decimal::new(10000, 2)))
//!         .with_description("Order #72")
//!         .with_capture(true)
//!         .with_confirmation(Confirmation::redirect("https://shop.example/return"));
//!
//!     let payment = payments
//!         .create_payment(&Context::background(), &request)
//!         .await?;
//!     println!("pay here: {}", payments.parse_payment_link(&payment)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`client`**: transport client, configuration, request context
//! - **`handlers`**: one handler per resource on top of the client
//! - **`types`**: payment, refund and payout data types
//! - **`api_error`**: classification of non-success responses
//! - **`idempotency`** / **`path`**: idempotency keys and endpoint building
//! - **`error`**: the crate-wide error type

pub mod api_error;
pub mod body;
pub mod client;
pub mod error;
pub mod handlers;
pub mod idempotency;
pub mod path;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use api_error::ApiError;
pub use client::{Client, ClientConfig, Context, Credentials};
pub use error::{ErrorKind, Result, YooKassaError};
pub use handlers::{PaymentHandler, PayoutHandler, RefundHandler};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
