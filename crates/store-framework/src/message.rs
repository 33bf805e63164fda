//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `StoreClient` and `StoreActor`.

use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the store actor.
///
/// A container owns exactly one state value, so there are no ids here:
///
/// - **Get**: Returns a clone of the current state.
/// - **Update**: Applies a local [`StoreEntity::Update`] and returns the new state.
/// - **Reset**: Replaces the state with `T::default()`.
/// - **Action**: Runs a remote [`StoreEntity::Action`] through `on_dispatch` and `handle_action`.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Get {
        respond_to: Response<T>,
    },
    Update {
        update: T::Update,
        respond_to: Response<T>,
    },
    Reset {
        respond_to: Response<()>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
