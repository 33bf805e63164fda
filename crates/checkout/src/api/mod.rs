//! # Checkout API
//!
//! The four REST calls the client depends on, behind the [`CheckoutApi`] trait so the
//! containers can run against the real server ([`HttpCheckoutApi`]) or an in-memory
//! double ([`mock::MockCheckoutApi`]).
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`CheckoutApi::list_products`] | `GET {base}/products` |
//! | [`CheckoutApi::get_product`] | `GET {base}/products/{id}` |
//! | [`CheckoutApi::create_order`] | `POST {base}/orders` |
//! | [`CheckoutApi::approve_payment`] | `POST {base}/payments/approve` |
//!
//! Any non-2xx response carries a `{code, message, detail?}` body, surfaced as
//! [`ClientError::Api`].

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::ApiConfig;
pub use error::{ClientError, ErrorBody};
pub use http::HttpCheckoutApi;

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::{
    ApprovePaymentRequest, ApprovePaymentResponse, CreateOrderRequest, Order, Product, ProductId,
};

#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn get_product(&self, id: ProductId) -> Result<Product, ClientError>;

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError>;

    async fn approve_payment(
        &self,
        request: &ApprovePaymentRequest,
    ) -> Result<ApprovePaymentResponse, ClientError>;
}

/// The API handle injected into every container actor.
pub type SharedApi = Arc<dyn CheckoutApi>;
