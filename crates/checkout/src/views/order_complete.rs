use std::fmt::Display;

use store_framework::ContainerClient;
use tracing::warn;

use super::format_amount;
use crate::clients::{OrderClient, PaymentClient};
use crate::model::{
    ApiError, ApprovalAttempt, ApprovePaymentResponse, ErrorCode, OrderId, PaymentOutcome,
};
use crate::payment_store::PaymentError;

pub const PROCESSING_MESSAGE: &str = "Processing payment...";
pub const COMPLETE_MESSAGE: &str = "Your order has been completed.";
const ORDER_MISSING: &str = "Order information not found.";

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCompleteScreen {
    /// Nothing has been sent yet.
    Pending,
    Processing,
    Complete {
        order_id: OrderId,
        amount_label: String,
        message: &'static str,
    },
    Failed {
        message: String,
        retryable: bool,
    },
}

impl Display for OrderCompleteScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderCompleteScreen::Pending => f.write_str("Waiting for payment."),
            OrderCompleteScreen::Processing => f.write_str(PROCESSING_MESSAGE),
            OrderCompleteScreen::Complete {
                order_id,
                amount_label,
                message,
            } => write!(f, "{message}\nOrder {order_id}  Paid {amount_label}"),
            OrderCompleteScreen::Failed { message, retryable } => {
                write!(f, "Payment failed: {message}")?;
                if *retryable {
                    f.write_str(" (retry available)")?;
                }
                Ok(())
            }
        }
    }
}

/// The `/orders/{orderId}/complete` screen: approves the current order and shows the result.
#[derive(Clone)]
pub struct OrderCompleteView {
    orders: OrderClient,
    payments: PaymentClient,
}

impl OrderCompleteView {
    pub fn new(orders: OrderClient, payments: PaymentClient) -> Self {
        Self { orders, payments }
    }

    /// Requests approval of the full total of the current order.
    pub async fn mount(&self) -> Result<ApprovePaymentResponse, PaymentError> {
        let order = self.orders.snapshot().state.current_order.ok_or_else(|| {
            PaymentError::Rejected(ApiError::new(ErrorCode::OrderNotFound, ORDER_MISSING))
        })?;
        let result = self
            .payments
            .request_approval(ApprovalAttempt::for_order(&order))
            .await;
        self.apply_outcome(&result).await;
        result
    }

    /// Clears the shown failure and sends the last request again.
    ///
    /// Without an earlier attempt for the current order nothing is sent and the failure
    /// stays on screen.
    pub async fn retry(&self) -> Result<ApprovePaymentResponse, PaymentError> {
        if !self.can_retry() {
            return Err(PaymentError::NothingToRetry);
        }
        self.payments.clear_error().await?;
        let result = self.payments.retry().await;
        self.apply_outcome(&result).await;
        result
    }

    async fn apply_outcome(&self, result: &Result<ApprovePaymentResponse, PaymentError>) {
        let outcome = match result {
            Ok(_) => PaymentOutcome::Approved,
            Err(e) => e.outcome(),
        };
        if outcome == PaymentOutcome::Rejected {
            return;
        }
        if let Err(e) = self.orders.apply_payment(outcome).await {
            warn!(error = %e, ?outcome, "Payment outcome not applied to the order");
        }
    }

    fn can_retry(&self) -> bool {
        let payments = self.payments.snapshot().state;
        self.orders
            .snapshot()
            .state
            .current_order
            .is_some_and(|order| payments.can_retry(&order.order_id))
    }

    pub fn render(&self) -> OrderCompleteScreen {
        let payments = self.payments.snapshot();
        if payments.is_loading {
            return OrderCompleteScreen::Processing;
        }
        if let Some(result) = payments.state.result {
            return OrderCompleteScreen::Complete {
                order_id: result.order_id,
                amount_label: format_amount(result.amount),
                message: COMPLETE_MESSAGE,
            };
        }
        if let Some(error) = payments.state.error {
            return OrderCompleteScreen::Failed {
                retryable: error.code != ErrorCode::PaymentAlreadyApproved && self.can_retry(),
                message: error.message,
            };
        }
        if self.orders.snapshot().state.current_order.is_none() {
            return OrderCompleteScreen::Failed {
                message: ORDER_MISSING.to_string(),
                retryable: false,
            };
        }
        OrderCompleteScreen::Pending
    }
}
