//! # Checkout Client Library
//!
//! Client side of a single-item checkout: browse products, place an order, approve the
//! payment and show the confirmation. The modules are exposed for the `checkout` binary
//! and for integration testing.
//!
//! - [`api`] - the REST calls behind the [`CheckoutApi`](api::CheckoutApi) trait
//! - [`product_store`], [`order_store`], [`payment_store`] - one container per concern
//! - [`clients`] - typed handles to the containers
//! - [`views`] - screen view-models composing the clients
//! - [`lifecycle`] - wiring, shutdown and tracing setup

pub mod api;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod payment_store;
pub mod product_store;
pub mod views;
