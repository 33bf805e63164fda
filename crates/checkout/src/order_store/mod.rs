//! # Order Container
//!
//! Submits a single-item order and tracks its status as payments are applied to it.
//!
//! ## Structure
//!
//! - [`entity`] - [`OrderState`] and its [`StoreEntity`](store_framework::StoreEntity) implementation
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`] and [`OrderUpdate`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Submission
//!
//! A quantity below 1, above the available stock, or for a product that is not on sale
//! is rejected before `POST /orders` is sent. The rejection is recorded in the state
//! exactly like a server error, with `QUANTITY_INVALID`, `OUT_OF_STOCK` or
//! `PRODUCT_NOT_AVAILABLE`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Order actor and its client.
pub fn new() -> (StoreActor<OrderState>, StoreClient<OrderState>) {
    StoreActor::new(32)
}
