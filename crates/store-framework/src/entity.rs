//! # StoreEntity Trait
//!
//! The `StoreEntity` trait defines the contract that every state container (products,
//! orders, payments, ...) must implement to be managed by the generic `StoreActor`.
//! It specifies associated types for local updates, remote actions, context and errors,
//! and provides the hooks the actor calls around each request.
//!
//! # Request Phases
//! Every remote action goes through two hooks:
//!
//! 1. [`StoreEntity::on_dispatch`] runs synchronously before anything leaves the process.
//!    It clears stale results and validates the input. Returning an error rejects the
//!    action without calling out; whatever the hook wrote into the state is still published.
//! 2. [`StoreEntity::handle_action`] performs the remote call and folds the result into
//!    the state. While it is awaited the actor publishes a snapshot with `is_loading = true`.
//!
//! Local mutations that never leave the process (clearing an error, resetting a result)
//! go through [`StoreEntity::on_update`].

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any state container must implement to be managed by `StoreActor`.
///
/// # Async & Context
/// `handle_action` is async so it can await remote calls. The `Context` type is injected
/// into it by the actor, which lets dependencies (an API client) be bound when the actor
/// is started rather than when it is constructed.
#[async_trait]
pub trait StoreEntity: Clone + Default + Debug + Send + Sync + 'static {
    /// Local, synchronous mutations (e.g. `ClearError`).
    type Update: Send + Sync + Debug;

    /// Operations that go through the remote API (e.g. `LoadProducts`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this container.
    ///
    /// One enum covers every action and update of the container. Clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Applies a local update.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Prepares the state for an outgoing action and validates it.
    ///
    /// An `Err` rejects the action before the remote call; the loading flag is never raised.
    fn on_dispatch(&mut self, _action: &Self::Action) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Performs the remote call behind an action and records its outcome.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// A published view of a container: its state plus whether a request is in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot<T> {
    pub state: T,
    pub is_loading: bool,
}

impl<T> Snapshot<T> {
    pub fn new(state: T, is_loading: bool) -> Self {
        Self { state, is_loading }
    }
}
