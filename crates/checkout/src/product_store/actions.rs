//! Remote actions and local updates for the Product container.

use crate::model::{Product, ProductId};

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// `GET /products`
    LoadProducts,
    /// `GET /products/{id}`, kept as the selected product.
    SelectProduct(ProductId),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    LoadProducts(Vec<Product>),
    SelectProduct(Product),
}

#[derive(Debug, Clone)]
pub enum ProductUpdate {
    ClearSelected,
    ClearError,
}
