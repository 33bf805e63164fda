//! [`StoreEntity`] implementation for the product cache.

use async_trait::async_trait;
use store_framework::StoreEntity;
use tracing::info;

use super::actions::{ProductAction, ProductActionResult, ProductUpdate};
use super::error::ProductError;
use crate::api::{ClientError, SharedApi};
use crate::model::{ApiError, Product};

const LOAD_FAILED: &str = "Failed to load products.";
const SELECT_FAILED: &str = "Failed to load the product.";

/// Read-through cache of the last catalogue responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub products: Vec<Product>,
    pub selected: Option<Product>,
    pub error: Option<ApiError>,
}

impl ProductState {
    fn fail(&mut self, err: ClientError, fallback: &str) -> ProductError {
        let mapped = err.into_api_error(fallback);
        self.error = Some(mapped.clone());
        ProductError::Api(mapped)
    }
}

#[async_trait]
impl StoreEntity for ProductState {
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = SharedApi;
    type Error = ProductError;

    fn on_update(&mut self, update: ProductUpdate) -> Result<(), Self::Error> {
        match update {
            ProductUpdate::ClearSelected => self.selected = None,
            ProductUpdate::ClearError => self.error = None,
        }
        Ok(())
    }

    fn on_dispatch(&mut self, _action: &ProductAction) -> Result<(), Self::Error> {
        self.error = None;
        Ok(())
    }

    /// # Actions
    /// - `LoadProducts`: replaces the product list; clears it on failure
    /// - `SelectProduct`: replaces the selected product; clears it on failure
    async fn handle_action(
        &mut self,
        action: ProductAction,
        api: &SharedApi,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::LoadProducts => match api.list_products().await {
                Ok(products) => {
                    info!(count = products.len(), "Products loaded");
                    self.products = products.clone();
                    Ok(ProductActionResult::LoadProducts(products))
                }
                Err(e) => {
                    self.products.clear();
                    Err(self.fail(e, LOAD_FAILED))
                }
            },
            ProductAction::SelectProduct(id) => match api.get_product(id).await {
                Ok(product) => {
                    info!(product_id = %id, "Product selected");
                    self.selected = Some(product.clone());
                    Ok(ProductActionResult::SelectProduct(product))
                }
                Err(e) => {
                    self.selected = None;
                    Err(self.fail(e, SELECT_FAILED))
                }
            },
        }
    }
}
