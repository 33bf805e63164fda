//! # Mock Checkout API
//!
//! An expectation-queue implementation of [`CheckoutApi`] for tests. Each call pops the
//! next expectation, records what was sent and replies with the queued result.
//!
//! ```rust
//! use checkout::api::mock::{api_error, MockCheckoutApi};
//! use checkout::api::{CheckoutApi, SharedApi};
//! use checkout::model::{ErrorCode, ProductId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockCheckoutApi::new());
//!     mock.expect_get_product()
//!         .return_err(api_error(404, ErrorCode::ProductNotFound, "Product not found."));
//!
//!     let api: SharedApi = mock.clone();
//!     assert!(api.get_product(ProductId(999)).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! Use [`ExpectationBuilder::wait_for`] to hold a call open until the test releases it,
//! which is how the loading flag of a container is observed.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;

use super::error::{ClientError, ErrorBody};
use super::CheckoutApi;
use crate::model::{
    ApprovePaymentRequest, ApprovePaymentResponse, CreateOrderRequest, ErrorCode, Order, Product,
    ProductId,
};

/// A call received by the mock, with the payload that was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListProducts,
    GetProduct(ProductId),
    CreateOrder(CreateOrderRequest),
    ApprovePayment(ApprovePaymentRequest),
}

#[derive(Debug)]
enum Reply {
    ListProducts(Result<Vec<Product>, ClientError>),
    GetProduct(Result<Product, ClientError>),
    CreateOrder(Result<Order, ClientError>),
    ApprovePayment(Result<ApprovePaymentResponse, ClientError>),
}

struct Expectation {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// Builds an API error response as the server would send it.
pub fn api_error(status: u16, code: ErrorCode, message: &str) -> ClientError {
    ClientError::Api {
        status,
        body: ErrorBody {
            code: Some(code),
            message: Some(message.to_string()),
            detail: None,
        },
    }
}

#[derive(Default)]
pub struct MockCheckoutApi {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<Vec<String>>,
}

impl MockCheckoutApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list_products(&self) -> ExpectationBuilder<'_, Vec<Product>> {
        ExpectationBuilder::new(self, Reply::ListProducts)
    }

    pub fn expect_get_product(&self) -> ExpectationBuilder<'_, Product> {
        ExpectationBuilder::new(self, Reply::GetProduct)
    }

    pub fn expect_create_order(&self) -> ExpectationBuilder<'_, Order> {
        ExpectationBuilder::new(self, Reply::CreateOrder)
    }

    pub fn expect_approve_payment(&self) -> ExpectationBuilder<'_, ApprovePaymentResponse> {
        ExpectationBuilder::new(self, Reply::ApprovePayment)
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Verifies that all expectations were met and every call matched one.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        if !failures.is_empty() {
            panic!("Mock API received unexpected calls: {:?}", *failures);
        }
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    async fn next(&self, call: ApiCall) -> Result<Reply, ClientError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.clone());

        let expectation = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match expectation {
            Some(Expectation { reply, gate }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(reply)
            }
            None => Err(self.fail(format!("no expectation for {call:?}"))),
        }
    }

    fn fail(&self, failure: String) -> ClientError {
        let err = ClientError::UnexpectedResponse(format!("mock: {failure}"));
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure);
        err
    }
}

#[async_trait]
impl CheckoutApi for MockCheckoutApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        match self.next(ApiCall::ListProducts).await? {
            Reply::ListProducts(result) => result,
            other => Err(self.fail(format!("list_products answered with {other:?}"))),
        }
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        match self.next(ApiCall::GetProduct(id)).await? {
            Reply::GetProduct(result) => result,
            other => Err(self.fail(format!("get_product answered with {other:?}"))),
        }
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
        match self.next(ApiCall::CreateOrder(request.clone())).await? {
            Reply::CreateOrder(result) => result,
            other => Err(self.fail(format!("create_order answered with {other:?}"))),
        }
    }

    async fn approve_payment(
        &self,
        request: &ApprovePaymentRequest,
    ) -> Result<ApprovePaymentResponse, ClientError> {
        match self.next(ApiCall::ApprovePayment(request.clone())).await? {
            Reply::ApprovePayment(result) => result,
            other => Err(self.fail(format!("approve_payment answered with {other:?}"))),
        }
    }
}

/// Builder for a single expected call.
pub struct ExpectationBuilder<'a, T> {
    mock: &'a MockCheckoutApi,
    wrap: fn(Result<T, ClientError>) -> Reply,
    gate: Option<oneshot::Receiver<()>>,
}

impl<'a, T> ExpectationBuilder<'a, T> {
    fn new(mock: &'a MockCheckoutApi, wrap: fn(Result<T, ClientError>) -> Reply) -> Self {
        Self {
            mock,
            wrap,
            gate: None,
        }
    }

    /// Holds the reply until `gate` fires (or its sender is dropped).
    pub fn wait_for(mut self, gate: oneshot::Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ClientError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<T, ClientError>) {
        let expectation = Expectation {
            reply: (self.wrap)(result),
            gate: self.gate,
        };
        self.mock
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let mock = MockCheckoutApi::new();
        mock.expect_list_products().return_ok(vec![]);
        mock.expect_get_product()
            .return_err(api_error(404, ErrorCode::ProductNotFound, "Product not found."));

        assert!(mock.list_products().await.unwrap().is_empty());
        let err = mock.get_product(ProductId(7)).await.unwrap_err();
        assert_eq!(err.into_api_error("").code, ErrorCode::ProductNotFound);

        assert_eq!(
            mock.calls(),
            vec![ApiCall::ListProducts, ApiCall::GetProduct(ProductId(7))]
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "unexpected calls")]
    async fn test_wrong_call_fails_verification() {
        let mock = MockCheckoutApi::new();
        mock.expect_list_products().return_ok(vec![]);

        assert!(mock.get_product(ProductId(1)).await.is_err());
        mock.verify();
    }
}
