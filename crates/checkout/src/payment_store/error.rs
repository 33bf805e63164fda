//! Error types for the Payment container.

use thiserror::Error;

use crate::model::{ApiError, PaymentOutcome, TransitionError};

/// Errors that can occur while approving a payment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    /// The gateway declined the payment (`PG_APPROVAL_FAILED`).
    #[error(transparent)]
    Declined(ApiError),

    /// The approval was refused before reaching the gateway.
    #[error(transparent)]
    Rejected(ApiError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("There is no payment request to retry")]
    NothingToRetry,

    /// An approval is already in flight.
    #[error("A payment request is already in progress")]
    Busy,

    /// An error occurred while communicating with the store actor.
    #[error("Store communication error: {0}")]
    Communication(String),
}

impl PaymentError {
    /// What this failure means for the order being paid.
    pub fn outcome(&self) -> PaymentOutcome {
        match self {
            PaymentError::Declined(_) => PaymentOutcome::Declined,
            _ => PaymentOutcome::Rejected,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            PaymentError::Declined(err) | PaymentError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
