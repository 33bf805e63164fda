//! [`StoreEntity`] implementation for the order being placed.

use async_trait::async_trait;
use store_framework::StoreEntity;
use tracing::{info, warn};

use super::actions::{OrderAction, OrderUpdate};
use super::error::OrderError;
use crate::api::SharedApi;
use crate::model::{ApiError, CreateOrderRequest, Order, OrderEvent};

const CREATE_FAILED: &str = "An error occurred while creating the order.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    pub current_order: Option<Order>,
    pub error: Option<ApiError>,
}

impl OrderState {
    fn reject(&mut self, err: ApiError) -> OrderError {
        self.error = Some(err.clone());
        OrderError::Rejected(err)
    }
}

#[async_trait]
impl StoreEntity for OrderState {
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = SharedApi;
    type Error = OrderError;

    fn on_update(&mut self, update: OrderUpdate) -> Result<(), Self::Error> {
        match update {
            OrderUpdate::ClearOrder => self.current_order = None,
            OrderUpdate::ClearError => self.error = None,
            OrderUpdate::ApplyPayment(outcome) => {
                let order = self
                    .current_order
                    .as_mut()
                    .ok_or(OrderError::NoCurrentOrder)?;
                order.status = order.status.apply(outcome)?;
                if let Some(event) = OrderEvent::from_outcome(outcome) {
                    info!(order_id = %order.order_id, ?event, status = %order.status, "Payment applied");
                }
            }
        }
        Ok(())
    }

    /// Clears the previous order and error, then applies the quantity and stock rules.
    fn on_dispatch(&mut self, action: &OrderAction) -> Result<(), Self::Error> {
        self.current_order = None;
        self.error = None;

        let OrderAction::Submit(draft) = action;
        if let Err(violation) = draft.validate() {
            warn!(
                product_id = %draft.product.product_id,
                quantity = draft.quantity,
                code = %violation.code(),
                "Order rejected locally"
            );
            return Err(self.reject(ApiError::new(violation.code(), violation.message())));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        api: &SharedApi,
    ) -> Result<Order, Self::Error> {
        let OrderAction::Submit(draft) = action;
        let request = CreateOrderRequest::from(&draft);

        match api.create_order(&request).await {
            Ok(order) => {
                let expected = draft.expected_total();
                if order.total_amount != expected {
                    warn!(
                        order_id = %order.order_id,
                        expected,
                        actual = order.total_amount,
                        "Server total differs from local computation"
                    );
                }
                info!(order_id = %order.order_id, event = ?OrderEvent::OrderCreated, "Order created");
                self.current_order = Some(order.clone());
                Ok(order)
            }
            Err(e) => Err(self.reject(e.into_api_error(CREATE_FAILED))),
        }
    }
}
