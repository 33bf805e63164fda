use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::api::SharedApi;
use crate::clients::{OrderClient, PaymentClient, ProductClient};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Store task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// Owns the three container actors of a checkout session.
///
/// The containers are independent: each receives the same API handle as its context
/// and none holds a client of another. Views compose them through the public clients.
///
/// # Example
///
/// ```ignore
/// let system = CheckoutSystem::new(Arc::new(HttpCheckoutApi::new(ApiConfig::default())?));
///
/// let products = system.product_client.load_products().await?;
/// let order = system.order_client.submit_order(draft).await?;
/// let payment = system.payment_client.request_approval(ApprovalAttempt::for_order(&order)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CheckoutSystem {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub payment_client: PaymentClient,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CheckoutSystem {
    /// Creates the three containers and starts them against `api`.
    pub fn new(api: SharedApi) -> Self {
        let (product_actor, product_client) = crate::product_store::new();
        let (order_actor, order_client) = crate::order_store::new();
        let (payment_actor, payment_client) = crate::payment_store::new();

        let product_handle = tokio::spawn(product_actor.run(api.clone()));
        let order_handle = tokio::spawn(order_actor.run(api.clone()));
        let payment_handle = tokio::spawn(payment_actor.run(api));

        Self {
            product_client: ProductClient::new(product_client),
            order_client: OrderClient::new(order_client),
            payment_client: PaymentClient::new(payment_client),
            handles: vec![product_handle, order_handle, payment_handle],
        }
    }

    /// Drops every client and waits for the store tasks to finish.
    ///
    /// Clones of the clients held elsewhere (by views, for instance) keep their stores
    /// alive, so drop those first.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down checkout system...");

        drop(self.product_client);
        drop(self.order_client);
        drop(self.payment_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(e.into());
            }
        }

        info!("Checkout system shutdown complete.");
        Ok(())
    }
}
