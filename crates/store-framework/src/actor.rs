//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the task that owns one container's state.
//! It processes messages sequentially and publishes a [`Snapshot`] after every change,
//! so readers never need to go through the message loop to render the current state.

use crate::client::StoreClient;
use crate::entity::{Snapshot, StoreEntity};
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that owns the state of a single container.
///
/// # Concurrency Model
/// The actor is the only writer of its state. Requests are handled one at a time, and
/// the remote call behind an action is awaited inside the loop, so a container never has
/// more than one call outstanding. Everything else the outside world knows about the
/// state comes from the `watch` channel.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass the dependencies (the API handle) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use store_framework::{StoreActor, StoreEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)] struct Counter { value: u32 }
/// #[derive(Debug)] enum CounterUpdate { Clear }
/// #[derive(Debug)] enum CounterAction { Add(u32) }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl StoreEntity for Counter {
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn on_update(&mut self, _: CounterUpdate) -> Result<(), Self::Error> {
///         self.value = 0;
///         Ok(())
///     }
///     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         let CounterAction::Add(n) = action;
///         self.value += n;
///         Ok(self.value)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     assert_eq!(client.perform_action(CounterAction::Add(2)).await.unwrap(), 2);
///     assert_eq!(client.snapshot().state.value, 2);
/// }
/// ```
///
/// ## Operations
///
/// * **Get**: Returns a clone of the state.
/// * **Update**: Calls `on_update`, publishes, returns the new state.
/// * **Reset**: Replaces the state with `T::default()` and publishes it.
/// * **Action**:
///     1. Calls `on_dispatch`. On error the state is published and the error returned;
///        nothing else happens.
///     2. Publishes the state with `is_loading = true`.
///     3. Awaits `handle_action`.
///     4. Publishes the state with `is_loading = false` and returns the result.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    state: T,
    publisher: watch::Sender<Snapshot<T>>,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshots) = watch::channel(Snapshot::default());
        let actor = Self {
            receiver,
            state: T::default(),
            publisher,
        };
        let client = StoreClient::new(sender, snapshots);
        (actor, client)
    }

    fn publish(&self, is_loading: bool) {
        self.publisher
            .send_replace(Snapshot::new(self.state.clone(), is_loading));
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is handed to every `handle_action` call.
    pub async fn run(mut self, context: T::Context) {
        let store = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(store, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { respond_to } => {
                    debug!(store, "Get");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StoreRequest::Update { update, respond_to } => {
                    debug!(store, ?update, "Update");
                    if let Err(e) = self.state.on_update(update) {
                        warn!(store, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.publish(false);
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StoreRequest::Reset { respond_to } => {
                    debug!(store, "Reset");
                    self.state = T::default();
                    self.publish(false);
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action { action, respond_to } => {
                    debug!(store, ?action, "Action");
                    if let Err(e) = self.state.on_dispatch(&action) {
                        warn!(store, error = %e, "Action rejected before dispatch");
                        self.publish(false);
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    self.publish(true);
                    let result = self
                        .state
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    self.publish(false);

                    match &result {
                        Ok(_) => info!(store, "Action ok"),
                        Err(e) => warn!(store, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(store, "Shutdown");
    }
}
