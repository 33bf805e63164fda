//! # ContainerClient Trait
//!
//! Provides a common interface for container-specific clients, adding default `state`,
//! `reset` and snapshot accessors built on top of a generic `StoreClient`.
use crate::{FrameworkError, Snapshot, StoreClient, StoreEntity};
use async_trait::async_trait;

/// Trait for container-specific clients to inherit the standard store operations.
///
/// # Example
///
/// ```rust
/// use store_framework::{ContainerClient, FrameworkError, StoreActor, StoreClient, StoreEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)] struct Basket { count: u32 }
/// #[derive(Debug)] enum BasketUpdate {}
/// #[derive(Debug)] enum BasketAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct BasketError(String);
///
/// #[async_trait]
/// impl StoreEntity for Basket {
///     type Update = BasketUpdate;
///     type Action = BasketAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BasketError;
///     fn on_update(&mut self, update: BasketUpdate) -> Result<(), Self::Error> { match update {} }
///     async fn handle_action(&mut self, action: BasketAction, _: &()) -> Result<(), Self::Error> { match action {} }
/// }
///
/// struct BasketClient { inner: StoreClient<Basket> }
///
/// impl ContainerClient<Basket> for BasketClient {
///     type Error = BasketError;
///     fn inner(&self) -> &StoreClient<Basket> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { BasketError(e.to_string()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, inner) = StoreActor::<Basket>::new(10);
///     tokio::spawn(actor.run(()));
///     let client = BasketClient { inner };
///
///     // state() and reset() are provided automatically
///     client.reset().await.unwrap();
///     assert_eq!(client.state().await.unwrap().count, 0);
/// }
/// ```
#[async_trait]
pub trait ContainerClient<T: StoreEntity>: Send + Sync {
    /// The container-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map framework errors to the container's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the current state through the actor.
    #[tracing::instrument(skip(self))]
    async fn state(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get().await.map_err(Self::map_error)
    }

    /// Reset the container to its initial state.
    #[tracing::instrument(skip(self))]
    async fn reset(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().reset().await.map_err(Self::map_error)
    }

    fn snapshot(&self) -> Snapshot<T> {
        self.inner().snapshot()
    }

    fn is_loading(&self) -> bool {
        self.inner().is_loading()
    }
}
