use std::fmt::Display;
use std::str::FromStr;

use crate::model::{OrderId, ProductId};

/// Navigation targets shared between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/products`
    ProductList,
    /// `/products/{id}`
    ProductOrder(ProductId),
    /// `/orders/{orderId}/complete`
    OrderComplete(OrderId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::ProductList => f.write_str("/products"),
            Route::ProductOrder(id) => write!(f, "/products/{id}"),
            Route::OrderComplete(id) => write!(f, "/orders/{id}/complete"),
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(path.to_string());
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match segments.as_slice() {
            ["products"] => Ok(Route::ProductList),
            ["products", id] => id
                .parse::<i64>()
                .map(|id| Route::ProductOrder(ProductId(id)))
                .map_err(|_| unknown()),
            ["orders", id, "complete"] if !id.is_empty() => {
                Ok(Route::OrderComplete(OrderId::from(*id)))
            }
            _ => Err(unknown()),
        }
    }
}
