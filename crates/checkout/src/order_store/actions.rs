//! Remote actions and local updates for the Order container.

use crate::model::{OrderDraft, PaymentOutcome};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Validates the draft locally, then `POST /orders`.
    Submit(OrderDraft),
}

#[derive(Debug, Clone)]
pub enum OrderUpdate {
    ClearOrder,
    ClearError,
    /// Moves the current order's status according to a payment attempt.
    ApplyPayment(PaymentOutcome),
}
