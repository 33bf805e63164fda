//! # Generic Client
//!
//! This module defines the generic client for communicating with store actors.

use crate::entity::{Snapshot, StoreEntity};
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch, Semaphore};

/// A type-safe handle to a `StoreActor`.
///
/// Writes go through the actor's channel and resolve via oneshot replies. Reads of the
/// last published [`Snapshot`] are synchronous and never touch the actor. The client is
/// cheap to clone and can be shared across tasks.
///
/// All clones share one in-flight permit, so at most one action per container is
/// outstanding at a time.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    snapshots: watch::Receiver<Snapshot<T>>,
    in_flight: Arc<Semaphore>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        snapshots: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self {
            sender,
            snapshots,
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    pub async fn get(&self) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    pub async fn update(&self, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update { update, respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    pub async fn reset(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Reset { respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    /// Dispatches a remote action.
    ///
    /// Fails fast with [`FrameworkError::Busy`] while the container is loading or another
    /// action sent through this client (or a clone) has not been answered yet.
    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let _permit = self
            .in_flight
            .try_acquire()
            .map_err(|_| FrameworkError::Busy)?;
        if self.is_loading() {
            return Err(FrameworkError::Busy);
        }
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    /// The last published snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshots.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshots.borrow().is_loading
    }

    /// A fresh receiver for observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshots.clone()
    }
}
