//! Resource types of the YooKassa API
//!
//! Every resource is a plain serde struct. Fields the server assigns
//! (`id`, `status`, timestamps) are `Option`s that stay `None` on requests;
//! statuses are carried, never changed locally.
//!
//! # Architecture
//!
//! - [`common`] - Amounts, cancellation details, list envelope
//! - [`payment`] - Payments, confirmations, payment list filter
//! - [`refund`] - Refunds and refund list filter
//! - [`payout`] - Payouts, destinations, payout list filter
//!
//! # Examples
//!
//! ```
//! use rust_yookassa::types::{Amount, Confirmation, Payment};
//! use rust_decimal::Decimal;
//!
//! let payment = Payment::new(Amount::rub(Decimal::new(10000, 2)))
//!     .with_capture(true)
//!     .with_confirmation(Confirmation::redirect("https://shop.example/return"))
//!     .with_description("Order 72");
//!
//! assert!(payment.id.is_none());
//! ```

pub mod common;
pub mod payment;
pub mod payout;
pub mod refund;

pub use common::{currencies, Amount, CancellationDetails, Metadata, ResourceList};
pub use payment::{
    Confirmation, Payment, PaymentList, PaymentListFilter, PaymentMethod, PaymentStatus, Recipient,
};
pub use payout::{Payout, PayoutCard, PayoutDestination, PayoutList, PayoutListFilter, PayoutStatus};
pub use refund::{Refund, RefundList, RefundListFilter, RefundStatus};
