use store_framework::{ContainerClient, FrameworkError, StoreClient};
use tracing::{debug, info, instrument};

use crate::model::{Order, OrderDraft, PaymentOutcome};
use crate::order_store::{OrderAction, OrderError, OrderState, OrderUpdate};

/// Client for interacting with the Order container.
///
/// Quantity and stock validation happen in the container's dispatch hook, so a
/// rejected draft comes back as [`OrderError::Rejected`] without any request being sent.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<OrderState>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<OrderState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, draft), fields(product_id = %draft.product.product_id, quantity = draft.quantity))]
    pub async fn submit_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        debug!(?draft, "submit_order called");
        info!("Sending submit_order to store");
        self.inner
            .perform_action(OrderAction::Submit(draft))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn apply_payment(&self, outcome: PaymentOutcome) -> Result<Order, OrderError> {
        let state = self
            .inner
            .update(OrderUpdate::ApplyPayment(outcome))
            .await
            .map_err(Self::map_error)?;
        state.current_order.ok_or(OrderError::NoCurrentOrder)
    }

    #[instrument(skip(self))]
    pub async fn clear_order(&self) -> Result<(), OrderError> {
        self.inner
            .update(OrderUpdate::ClearOrder)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear_error(&self) -> Result<(), OrderError> {
        self.inner
            .update(OrderUpdate::ClearError)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

impl ContainerClient<OrderState> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<OrderState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Busy => OrderError::Busy,
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::Communication(e.to_string())),
        }
    }
}
