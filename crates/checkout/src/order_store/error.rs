//! Error types for the Order container.

use thiserror::Error;

use crate::model::{ApiError, TransitionError};

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order was refused, either locally before submission or by the server.
    #[error(transparent)]
    Rejected(ApiError),

    /// A payment outcome does not fit the current order status.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A payment outcome arrived while no order is held.
    #[error("No order has been placed")]
    NoCurrentOrder,

    /// An order submission is already in flight.
    #[error("An order request is already in progress")]
    Busy,

    /// An error occurred while communicating with the store actor.
    #[error("Store communication error: {0}")]
    Communication(String),
}

impl OrderError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            OrderError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
