use std::fmt::Display;

use store_framework::ContainerClient;

use super::{format_amount, Route};
use crate::clients::ProductClient;
use crate::model::{Product, ProductId};
use crate::product_store::ProductError;

pub const LOADING_MESSAGE: &str = "Loading products...";
pub const EMPTY_MESSAGE: &str = "No products registered.";

/// One entry of the product list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub name: String,
    pub price_label: String,
    pub available_stock: i32,
    /// Whether the card leads to the order screen.
    pub selectable: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name.clone(),
            price_label: format_amount(product.discount_price),
            available_stock: product.available_stock,
            selectable: product.is_orderable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductListScreen {
    Loading,
    Error(String),
    Empty,
    Cards(Vec<ProductCard>),
}

impl Display for ProductListScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductListScreen::Loading => f.write_str(LOADING_MESSAGE),
            ProductListScreen::Error(message) => write!(f, "Error: {message}"),
            ProductListScreen::Empty => f.write_str(EMPTY_MESSAGE),
            ProductListScreen::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "[{}] {}  {} (stock {})",
                        card.product_id, card.name, card.price_label, card.available_stock
                    )?;
                    if !card.selectable {
                        f.write_str(" - sold out")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// The `/products` screen.
#[derive(Clone)]
pub struct ProductListView {
    products: ProductClient,
}

impl ProductListView {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    /// Loads the catalogue. A failure is also left in the container for [`render`](Self::render).
    pub async fn mount(&self) -> Result<(), ProductError> {
        self.products.load_products().await.map(|_| ())
    }

    pub fn render(&self) -> ProductListScreen {
        let snapshot = self.products.snapshot();
        if snapshot.is_loading {
            return ProductListScreen::Loading;
        }
        if let Some(error) = snapshot.state.error {
            return ProductListScreen::Error(error.message);
        }
        if snapshot.state.products.is_empty() {
            return ProductListScreen::Empty;
        }
        ProductListScreen::Cards(snapshot.state.products.iter().map(ProductCard::from).collect())
    }

    /// Route for a clicked card, `None` when the product cannot be ordered or is not listed.
    pub fn select(&self, id: ProductId) -> Option<Route> {
        self.products
            .snapshot()
            .state
            .products
            .iter()
            .find(|p| p.product_id == id)
            .filter(|p| p.is_orderable())
            .map(|p| Route::ProductOrder(p.product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiError, ErrorCode};
    use crate::product_store::ProductState;
    use chrono::NaiveDate;
    use store_framework::mock::MockStore;
    use store_framework::FrameworkError;

    fn product(id: i64, name: &str, price: i64, stock: i32) -> Product {
        Product {
            product_id: ProductId(id),
            name: name.to_string(),
            base_price: price + 21_000,
            discount_price: price,
            available_stock: stock,
            available: true,
            created_at: NaiveDate::from_ymd_opt(2025, 12, 4)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .unwrap(),
        }
    }

    fn view_with(state: ProductState, is_loading: bool) -> (ProductListView, MockStore<ProductState>) {
        let mock = MockStore::new();
        mock.set_snapshot(state, is_loading);
        (ProductListView::new(ProductClient::new(mock.client())), mock)
    }

    #[tokio::test]
    async fn test_render_states() {
        let (view, _mock) = view_with(ProductState::default(), true);
        assert_eq!(view.render(), ProductListScreen::Loading);
        assert_eq!(view.render().to_string(), "Loading products...");

        let (view, _mock) = view_with(ProductState::default(), false);
        assert_eq!(view.render(), ProductListScreen::Empty);
        assert_eq!(view.render().to_string(), "No products registered.");

        let failed = ProductState {
            error: Some(ApiError::new(ErrorCode::UnknownError, "Network Error")),
            ..Default::default()
        };
        let (view, _mock) = view_with(failed, false);
        assert_eq!(view.render(), ProductListScreen::Error("Network Error".to_string()));
    }

    #[tokio::test]
    async fn test_cards_and_selection() {
        let mut sold_out = product(102, "Air Purifier", 180_000, 0);
        sold_out.available = false;
        let state = ProductState {
            products: vec![product(101, "Wireless Vacuum Premium", 129_000, 50), sold_out],
            ..Default::default()
        };
        let (view, _mock) = view_with(state, false);

        let ProductListScreen::Cards(cards) = view.render() else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].price_label, "129,000 KRW");
        assert!(cards[0].selectable);
        assert!(!cards[1].selectable);
        assert!(view.render().to_string().ends_with("- sold out"));

        assert_eq!(view.select(ProductId(101)), Some(Route::ProductOrder(ProductId(101))));
        assert_eq!(view.select(ProductId(102)), None);
        assert_eq!(view.select(ProductId(999)), None);
    }

    #[tokio::test]
    async fn test_mount_loads_products() {
        let mut mock = MockStore::<ProductState>::new();
        mock.expect_action()
            .return_err(FrameworkError::EntityError(Box::new(ProductError::Api(
                ApiError::unknown("Network Error"),
            ))));
        let view = ProductListView::new(ProductClient::new(mock.client()));

        let result = view.mount().await;
        assert_eq!(result, Err(ProductError::Api(ApiError::unknown("Network Error"))));
        mock.verify();
    }
}
