//! # Payment Container
//!
//! Requests approval of a payment for an order and keeps the last request for retry.
//!
//! ## Structure
//!
//! - [`entity`] - [`PaymentState`] and its [`StoreEntity`](store_framework::StoreEntity) implementation
//! - [`error`] - [`PaymentError`]
//! - [`actions`] - [`PaymentAction`] and [`PaymentUpdate`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Status
//!
//! `REQUESTED` is entered when an attempt is dispatched and settles into `APPROVED` or
//! `DECLINED`. A declined payment may be retried; an approved one may not. Failures
//! that never reached the gateway leave no payment status behind.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Payment actor and its client.
pub fn new() -> (StoreActor<PaymentState>, StoreClient<PaymentState>) {
    StoreActor::new(32)
}
