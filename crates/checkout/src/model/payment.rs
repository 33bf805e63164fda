//! Payments, the payment status machine and the approval payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::order::{Order, OrderId, OrderStatus, TransitionError};

/// Key identifying a payment at the gateway, e.g. `pay_3f1c...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentKey(pub String);

impl PaymentKey {
    pub fn generate() -> Self {
        Self(format!("pay_{}", Uuid::new_v4().simple()))
    }
}

impl From<&str> for PaymentKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl Display for PaymentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Requested,
    Approved,
    Declined,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Requested => "REQUESTED",
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::Declined => "DECLINED",
        }
    }

    /// Enters `REQUESTED` for a new attempt. Only an approved payment cannot be attempted again.
    pub fn begin_attempt(current: Option<Self>) -> Result<Self, TransitionError> {
        match current {
            Some(PaymentStatus::Approved) => Err(TransitionError {
                from: PaymentStatus::Approved.as_str(),
                to: PaymentStatus::Requested.as_str(),
            }),
            _ => Ok(PaymentStatus::Requested),
        }
    }

    /// Settles a requested payment. A rejected attempt leaves no payment behind.
    pub fn settle(self, outcome: PaymentOutcome) -> Result<Option<Self>, TransitionError> {
        if self != PaymentStatus::Requested {
            return Err(TransitionError {
                from: self.as_str(),
                to: match outcome {
                    PaymentOutcome::Approved => PaymentStatus::Approved.as_str(),
                    _ => PaymentStatus::Declined.as_str(),
                },
            });
        }
        Ok(match outcome {
            PaymentOutcome::Approved => Some(PaymentStatus::Approved),
            PaymentOutcome::Declined => Some(PaymentStatus::Declined),
            PaymentOutcome::Rejected => None,
        })
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a payment attempt ended, from the order's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The gateway approved the payment.
    Approved,
    /// The gateway declined the payment.
    Declined,
    /// The attempt was refused before reaching the gateway.
    Rejected,
}

/// A payment record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub order_id: OrderId,
    pub payment_key: PaymentKey,
    pub amount: i64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub pg_result_code: Option<String>,
    #[serde(default)]
    pub pg_result_message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /payments/approve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePaymentRequest {
    pub order_id: OrderId,
    pub payment_key: PaymentKey,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePaymentResponse {
    pub order_id: OrderId,
    pub payment_id: i64,
    pub payment_key: PaymentKey,
    pub amount: i64,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub approved_at: NaiveDateTime,
}

/// One approval request plus the order total the client expects it to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalAttempt {
    pub request: ApprovePaymentRequest,
    pub expected_total: Option<i64>,
}

impl ApprovalAttempt {
    /// An attempt whose amount is not checked locally.
    pub fn new(order_id: OrderId, payment_key: PaymentKey, amount: i64) -> Self {
        Self {
            request: ApprovePaymentRequest {
                order_id,
                payment_key,
                amount,
            },
            expected_total: None,
        }
    }

    /// Pays the full total of `order` with a freshly generated key.
    pub fn for_order(order: &Order) -> Self {
        Self::new(
            order.order_id.clone(),
            PaymentKey::generate(),
            order.total_amount,
        )
        .expecting(order.total_amount)
    }

    pub fn expecting(mut self, total: i64) -> Self {
        self.expected_total = Some(total);
        self
    }
}
