//! Error types for the Product container.

use thiserror::Error;

use crate::model::ApiError;

/// Errors that can occur while loading products.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The API call failed; the mapped error is also recorded in the state.
    #[error(transparent)]
    Api(ApiError),

    /// A product request is already in flight.
    #[error("A product request is already in progress")]
    Busy,

    /// An error occurred while communicating with the store actor.
    #[error("Store communication error: {0}")]
    Communication(String),
}
