//! # Product Client
//!
//! Provides a high-level API for interacting with the Product container.
//! It wraps a `StoreClient<ProductState>` and exposes domain-specific methods.
use store_framework::{ContainerClient, FrameworkError, StoreClient};
use tracing::{debug, instrument};

use crate::model::{Product, ProductId};
use crate::product_store::{
    ProductAction, ProductActionResult, ProductError, ProductState, ProductUpdate,
};

/// Client for interacting with the Product container.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<ProductState>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<ProductState>) -> Self {
        Self { inner }
    }
}

impl ContainerClient<ProductState> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<ProductState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Busy => ProductError::Busy,
            other => other
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|e| ProductError::Communication(e.to_string())),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::Communication(format!("unexpected action result: {result:?}"))
}

impl ProductClient {
    /// Fetch the product list and cache it.
    #[instrument(skip(self))]
    pub async fn load_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(ProductAction::LoadProducts)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::LoadProducts(products) => Ok(products),
            other => Err(unexpected(other)),
        }
    }

    /// Fetch one product and keep it as the selected product.
    #[instrument(skip(self))]
    pub async fn select_product(&self, id: ProductId) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(ProductAction::SelectProduct(id))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::SelectProduct(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear_selected(&self) -> Result<(), ProductError> {
        self.inner
            .update(ProductUpdate::ClearSelected)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear_error(&self) -> Result<(), ProductError> {
        self.inner
            .update(ProductUpdate::ClearError)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiError, ErrorCode};
    use store_framework::mock::MockStore;

    #[tokio::test]
    async fn test_entity_error_is_recovered() {
        let mut mock = MockStore::<ProductState>::new();
        let not_found = ApiError::new(ErrorCode::ProductNotFound, "Product not found.");
        mock.expect_action()
            .return_err(FrameworkError::EntityError(Box::new(ProductError::Api(
                not_found.clone(),
            ))));

        let client = ProductClient::new(mock.client());
        let err = client.select_product(ProductId(999)).await.unwrap_err();
        assert_eq!(err, ProductError::Api(not_found));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_result_is_a_communication_error() {
        let mut mock = MockStore::<ProductState>::new();
        mock.expect_action()
            .return_ok(ProductActionResult::LoadProducts(vec![]));

        let client = ProductClient::new(mock.client());
        let err = client.select_product(ProductId(101)).await.unwrap_err();
        assert!(matches!(err, ProductError::Communication(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_loading_store_rejects_as_busy() {
        let mock = MockStore::<ProductState>::new();
        mock.set_snapshot(ProductState::default(), true);

        let client = ProductClient::new(mock.client());
        assert_eq!(client.load_products().await, Err(ProductError::Busy));
        assert!(client.is_loading());
        mock.verify();
    }
}
