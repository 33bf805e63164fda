use store_framework::{ContainerClient, FrameworkError, StoreClient};
use tracing::{debug, instrument};

use crate::model::{ApprovalAttempt, ApprovePaymentResponse};
use crate::payment_store::{PaymentAction, PaymentError, PaymentState, PaymentUpdate};

/// Client for interacting with the Payment container.
#[derive(Clone)]
pub struct PaymentClient {
    inner: StoreClient<PaymentState>,
}

impl PaymentClient {
    pub fn new(inner: StoreClient<PaymentState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, attempt), fields(order_id = %attempt.request.order_id, amount = attempt.request.amount))]
    pub async fn request_approval(
        &self,
        attempt: ApprovalAttempt,
    ) -> Result<ApprovePaymentResponse, PaymentError> {
        debug!(payment_key = %attempt.request.payment_key, "Sending request");
        self.inner
            .perform_action(PaymentAction::Approve(attempt))
            .await
            .map_err(Self::map_error)
    }

    /// Sends the last approval request again.
    #[instrument(skip(self))]
    pub async fn retry(&self) -> Result<ApprovePaymentResponse, PaymentError> {
        debug!("Sending request");
        self.inner
            .perform_action(PaymentAction::Retry)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear_result(&self) -> Result<(), PaymentError> {
        self.inner
            .update(PaymentUpdate::ClearResult)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear_error(&self) -> Result<(), PaymentError> {
        self.inner
            .update(PaymentUpdate::ClearError)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

impl ContainerClient<PaymentState> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &StoreClient<PaymentState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Busy => PaymentError::Busy,
            other => other
                .downcast_entity::<PaymentError>()
                .unwrap_or_else(|e| PaymentError::Communication(e.to_string())),
        }
    }
}
