//! Remote actions and local updates for the Payment container.

use crate::model::ApprovalAttempt;

#[derive(Debug, Clone)]
pub enum PaymentAction {
    /// `POST /payments/approve`
    Approve(ApprovalAttempt),
    /// Sends the last approval request again.
    Retry,
}

#[derive(Debug, Clone)]
pub enum PaymentUpdate {
    ClearResult,
    ClearError,
}
