//! Orders, the order status machine and the order creation payload.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::payment::PaymentOutcome;
use super::product::{Product, ProductId, QuantityViolation};

/// Server-issued order identifier, e.g. `ORD-20251204-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid status transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    PaymentFailed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::Paid => "PAID",
            OrderStatus::PaymentFailed => "PAYMENT_FAILED",
        }
    }

    /// A failed payment leaves the order open for another attempt.
    pub fn is_payable(&self) -> bool {
        matches!(self, OrderStatus::PendingPayment | OrderStatus::PaymentFailed)
    }

    /// The status after a payment attempt with the given outcome.
    ///
    /// Rejections that never reached the gateway keep the current status.
    pub fn apply(self, outcome: PaymentOutcome) -> Result<Self, TransitionError> {
        let next = match outcome {
            PaymentOutcome::Rejected => return Ok(self),
            PaymentOutcome::Approved => OrderStatus::Paid,
            PaymentOutcome::Declined => OrderStatus::PaymentFailed,
        };
        if !self.is_payable() {
            return Err(TransitionError {
                from: self.as_str(),
                to: next.as_str(),
            });
        }
        Ok(next)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries of an order's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    OrderCreated,
    PaymentApproved,
    PaymentFailed,
}

impl OrderEvent {
    /// The history entry a payment outcome produces, if any.
    pub fn from_outcome(outcome: PaymentOutcome) -> Option<Self> {
        match outcome {
            PaymentOutcome::Approved => Some(OrderEvent::PaymentApproved),
            PaymentOutcome::Declined => Some(OrderEvent::PaymentFailed),
            PaymentOutcome::Rejected => None,
        }
    }
}

/// An order as known to the client.
///
/// The create endpoint returns this without timestamps; the full record carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: i64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

/// What the order form holds before submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub product: Product,
    pub quantity: i32,
}

impl OrderDraft {
    pub fn new(user_id: UserId, product: Product, quantity: i32) -> Self {
        Self {
            user_id,
            product,
            quantity,
        }
    }

    /// Total the server is expected to charge for this draft.
    pub fn expected_total(&self) -> i64 {
        self.product.total_for(self.quantity)
    }

    /// Applies the local quantity and stock rules and builds the request body.
    pub fn validate(&self) -> Result<CreateOrderRequest, QuantityViolation> {
        self.product.check_quantity(self.quantity)?;
        Ok(CreateOrderRequest::from(self))
    }
}

impl From<&OrderDraft> for CreateOrderRequest {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            user_id: draft.user_id,
            product_id: draft.product.product_id,
            quantity: draft.quantity,
        }
    }
}
