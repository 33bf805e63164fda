//! [`StoreEntity`] implementation for the payment being approved.

use async_trait::async_trait;
use store_framework::StoreEntity;
use tracing::{info, warn};

use super::actions::{PaymentAction, PaymentUpdate};
use super::error::PaymentError;
use crate::api::SharedApi;
use crate::model::{
    ApiError, ApprovalAttempt, ApprovePaymentResponse, ErrorCode, OrderId, PaymentOutcome,
    PaymentStatus,
};

const APPROVE_FAILED: &str = "An error occurred while approving the payment.";
const GATEWAY_DECLINED: &str = "The payment gateway declined the payment.";
const ALREADY_APPROVED: &str = "This payment has already been approved.";
const AMOUNT_MISMATCH: &str = "The payment amount does not match the order total.";
const NOT_SETTLED: &str = "The payment was not settled.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentState {
    /// Response of the last approved payment.
    pub result: Option<ApprovePaymentResponse>,
    pub payment_status: Option<PaymentStatus>,
    /// The attempt `Retry` sends again.
    pub last_request: Option<ApprovalAttempt>,
    pub error: Option<ApiError>,
}

impl PaymentState {
    /// Whether `Retry` has an attempt for `order_id` to send again.
    pub fn can_retry(&self, order_id: &OrderId) -> bool {
        self.last_request
            .as_ref()
            .is_some_and(|last| &last.request.order_id == order_id)
    }

    fn record(&mut self, err: ApiError) -> ApiError {
        self.error = Some(err.clone());
        err
    }

    fn settle(&mut self, outcome: PaymentOutcome) -> Result<(), PaymentError> {
        let current = self.payment_status.unwrap_or(PaymentStatus::Requested);
        self.payment_status = current.settle(outcome)?;
        Ok(())
    }

    fn decline(&mut self, err: ApiError) -> Result<ApprovePaymentResponse, PaymentError> {
        self.settle(PaymentOutcome::Declined)?;
        Err(PaymentError::Declined(self.record(err)))
    }

    fn reject(&mut self, err: ApiError) -> Result<ApprovePaymentResponse, PaymentError> {
        self.settle(PaymentOutcome::Rejected)?;
        Err(PaymentError::Rejected(self.record(err)))
    }
}

#[async_trait]
impl StoreEntity for PaymentState {
    type Update = PaymentUpdate;
    type Action = PaymentAction;
    type ActionResult = ApprovePaymentResponse;
    type Context = SharedApi;
    type Error = PaymentError;

    fn on_update(&mut self, update: PaymentUpdate) -> Result<(), Self::Error> {
        match update {
            PaymentUpdate::ClearResult => self.result = None,
            PaymentUpdate::ClearError => self.error = None,
        }
        Ok(())
    }

    /// Clears the previous result and error and enters `REQUESTED`.
    ///
    /// An attempt whose amount differs from the expected order total, or for a payment
    /// that is already approved, is refused here and leaves the payment status as it was.
    /// A `Retry` with nothing to resend changes nothing, so the shown error stays.
    fn on_dispatch(&mut self, action: &PaymentAction) -> Result<(), Self::Error> {
        let attempt = match action {
            PaymentAction::Approve(attempt) => attempt.clone(),
            PaymentAction::Retry => self
                .last_request
                .clone()
                .ok_or(PaymentError::NothingToRetry)?,
        };

        self.error = None;
        self.result = None;

        if let Some(expected) = attempt.expected_total {
            if expected != attempt.request.amount {
                warn!(
                    order_id = %attempt.request.order_id,
                    expected,
                    amount = attempt.request.amount,
                    "Payment amount mismatch"
                );
                let err = ApiError::new(ErrorCode::AmountMismatch, AMOUNT_MISMATCH).with_detail(
                    format!("expected {expected}, requested {}", attempt.request.amount),
                );
                return Err(PaymentError::Rejected(self.record(err)));
            }
        }

        let same_order = self
            .last_request
            .as_ref()
            .is_some_and(|last| last.request.order_id == attempt.request.order_id);
        let current = if same_order { self.payment_status } else { None };

        let next = match PaymentStatus::begin_attempt(current) {
            Ok(next) => next,
            Err(_) => {
                let err = ApiError::new(ErrorCode::PaymentAlreadyApproved, ALREADY_APPROVED);
                return Err(PaymentError::Rejected(self.record(err)));
            }
        };

        self.payment_status = Some(next);
        self.last_request = Some(attempt);
        Ok(())
    }

    /// # Outcomes
    /// - `APPROVED` response: result stored, status `APPROVED`
    /// - `DECLINED` response or `PG_APPROVAL_FAILED` error: status `DECLINED`
    /// - any other error: no payment left behind, status cleared
    async fn handle_action(
        &mut self,
        _action: PaymentAction,
        api: &SharedApi,
    ) -> Result<ApprovePaymentResponse, Self::Error> {
        let attempt = self
            .last_request
            .clone()
            .ok_or(PaymentError::NothingToRetry)?;

        match api.approve_payment(&attempt.request).await {
            Ok(response) => match response.payment_status {
                PaymentStatus::Approved => {
                    self.settle(PaymentOutcome::Approved)?;
                    info!(
                        order_id = %response.order_id,
                        payment_id = response.payment_id,
                        order_status = %response.order_status,
                        "Payment approved"
                    );
                    self.result = Some(response.clone());
                    Ok(response)
                }
                PaymentStatus::Declined => {
                    warn!(order_id = %response.order_id, "Payment declined by gateway");
                    self.decline(ApiError::new(ErrorCode::PgApprovalFailed, GATEWAY_DECLINED))
                }
                PaymentStatus::Requested => self.reject(ApiError::unknown(NOT_SETTLED)),
            },
            Err(e) => {
                let err = e.into_api_error(APPROVE_FAILED);
                if err.code == ErrorCode::PgApprovalFailed {
                    self.decline(err)
                } else {
                    self.reject(err)
                }
            }
        }
    }
}
