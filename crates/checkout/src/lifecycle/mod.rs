//! # System Lifecycle
//!
//! Starting, wiring and shutting down the checkout containers.
//!
//! ## Dependency Injection via Context
//!
//! Every container's `Context` is the shared API handle ([`SharedApi`](crate::api::SharedApi)).
//! It is injected when the actor starts, so tests can run the real containers against
//! [`MockCheckoutApi`](crate::api::mock::MockCheckoutApi) and the CLI against
//! [`HttpCheckoutApi`](crate::api::HttpCheckoutApi) without any change to the containers.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Stores detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for all store tasks to finish
//!
//! See [`tracing`](self::tracing) for the logging setup.

pub mod checkout_system;
pub mod tracing;

pub use self::checkout_system::*;
pub use self::tracing::*;
