//! # Store Framework
//!
//! Building blocks for client-side state containers backed by the **Actor Model**.
//!
//! Each container (a product cache, the order being placed, the payment being approved)
//! owns one state value inside its own tokio task. Callers never touch that value
//! directly: they send messages through a typed [`StoreClient`] and read the last
//! published [`Snapshot`], which carries the state together with an `is_loading` flag.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - The container's state and the rules for changing it
//! 2. **Runtime Layer** ([`StoreActor`]) - Sequential message processing and snapshot publishing
//! 3. **Interface Layer** ([`StoreClient`], [`ContainerClient`]) - Type-safe communication
//!
//! ## Request Model
//!
//! - **Updates** are local and synchronous: clear an error, drop a cached result.
//! - **Actions** go through a remote API. `on_dispatch` validates and prepares the state,
//!   the actor raises the loading flag, `handle_action` awaits the call and records the
//!   outcome, and the flag drops again.
//! - While a container is loading, further actions are rejected with [`FrameworkError::Busy`].
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor is started, not when it is created:
//!
//! ```rust
//! use store_framework::{StoreActor, StoreEntity};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! trait PriceFeed: Send + Sync { fn price(&self) -> i64; }
//! struct Fixed;
//! impl PriceFeed for Fixed { fn price(&self) -> i64 { 129_000 } }
//!
//! #[derive(Clone, Debug, Default)] struct Quote { last: Option<i64> }
//! #[derive(Debug)] enum QuoteUpdate { Clear }
//! #[derive(Debug)] enum QuoteAction { Refresh }
//! #[derive(Debug, thiserror::Error)] #[error("quote error")] struct QuoteError;
//!
//! #[async_trait]
//! impl StoreEntity for Quote {
//!     type Update = QuoteUpdate;
//!     type Action = QuoteAction;
//!     type ActionResult = i64;
//!     type Context = Arc<dyn PriceFeed>;
//!     type Error = QuoteError;
//!
//!     fn on_update(&mut self, _: QuoteUpdate) -> Result<(), Self::Error> {
//!         self.last = None;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: QuoteAction, feed: &Arc<dyn PriceFeed>) -> Result<i64, Self::Error> {
//!         let price = feed.price();
//!         self.last = Some(price);
//!         Ok(price)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Quote>::new(10);
//!     tokio::spawn(actor.run(Arc::new(Fixed)));
//!
//!     assert_eq!(client.perform_action(QuoteAction::Refresh).await.unwrap(), 129_000);
//!     assert_eq!(client.snapshot().state.last, Some(129_000));
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real [`StoreClient`] from a queue of expectations and lets
//! tests publish arbitrary snapshots, so code that consumes a container can be tested
//! without running the container itself.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::ContainerClient;
pub use entity::{Snapshot, StoreEntity};
pub use error::FrameworkError;
pub use message::{Response, StoreRequest};
