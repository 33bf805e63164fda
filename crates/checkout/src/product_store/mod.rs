//! # Product Container
//!
//! Loads the catalogue and the product picked for ordering.
//!
//! ## Structure
//!
//! - [`entity`] - [`ProductState`] and its [`StoreEntity`](store_framework::StoreEntity) implementation
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`], [`ProductActionResult`] and [`ProductUpdate`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! Both actions clear the previous error before calling out. A failed call clears the
//! value it would have replaced and records the mapped error.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use store_framework::{StoreActor, StoreClient};

/// Creates a new Product actor and its client.
pub fn new() -> (StoreActor<ProductState>, StoreClient<ProductState>) {
    StoreActor::new(32)
}
