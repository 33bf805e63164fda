use std::fmt::Display;

use store_framework::ContainerClient;

use super::{format_amount, Route};
use crate::clients::{OrderClient, ProductClient};
use crate::model::{ApiError, ErrorCode, OrderDraft, Product, ProductId, UserId};
use crate::order_store::OrderError;
use crate::product_store::ProductError;

pub const STOCK_WARNING: &str = "Not enough stock.";
const PRODUCT_MISSING: &str = "Product not found.";

/// Everything the order form shows for the selected product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub name: String,
    pub price_label: String,
    pub available_stock: i32,
    pub quantity: i32,
    pub total_label: String,
    pub stock_warning: Option<&'static str>,
    pub submit_enabled: bool,
    /// Message of the last failed submission.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductOrderScreen {
    Loading,
    Error(String),
    Form(OrderForm),
}

impl Display for ProductOrderScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductOrderScreen::Loading => f.write_str("Loading product..."),
            ProductOrderScreen::Error(message) => write!(f, "Error: {message}"),
            ProductOrderScreen::Form(form) => {
                writeln!(f, "{}  {} (stock {})", form.name, form.price_label, form.available_stock)?;
                write!(f, "Quantity {}  Total {}", form.quantity, form.total_label)?;
                if let Some(warning) = form.stock_warning {
                    write!(f, "\n{warning}")?;
                }
                if let Some(error) = &form.error {
                    write!(f, "\nError: {error}")?;
                }
                Ok(())
            }
        }
    }
}

/// The `/products/{id}` screen: pick a quantity and place the order.
pub struct ProductOrderView {
    products: ProductClient,
    orders: OrderClient,
    user_id: UserId,
    quantity: i32,
}

impl ProductOrderView {
    pub fn new(products: ProductClient, orders: OrderClient, user_id: UserId) -> Self {
        Self {
            products,
            orders,
            user_id,
            quantity: 1,
        }
    }

    pub async fn mount(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products.select_product(id).await
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    fn selected(&self) -> Option<Product> {
        self.products.snapshot().state.selected
    }

    /// `discount price × quantity` for the selected product.
    pub fn total(&self) -> Option<i64> {
        self.selected().map(|p| p.total_for(self.quantity))
    }

    pub fn stock_warning(&self) -> Option<&'static str> {
        self.selected()
            .filter(|p| self.quantity > p.available_stock)
            .map(|_| STOCK_WARNING)
    }

    pub fn can_submit(&self) -> bool {
        let in_range = self
            .selected()
            .is_some_and(|p| p.check_quantity(self.quantity).is_ok());
        in_range && !self.products.is_loading() && !self.orders.is_loading()
    }

    /// Places the order and returns the confirmation route.
    ///
    /// Out-of-range quantities still reach the order container, which refuses them locally
    /// and keeps the error for the form.
    pub async fn submit(&self) -> Result<Route, OrderError> {
        let product = self.selected().ok_or_else(|| {
            OrderError::Rejected(ApiError::new(ErrorCode::ProductNotFound, PRODUCT_MISSING))
        })?;
        let draft = OrderDraft::new(self.user_id, product, self.quantity);
        let order = self.orders.submit_order(draft).await?;
        Ok(Route::OrderComplete(order.order_id))
    }

    pub fn render(&self) -> ProductOrderScreen {
        let products = self.products.snapshot();
        if let Some(error) = products.state.error {
            return ProductOrderScreen::Error(error.message);
        }
        let Some(product) = products.state.selected else {
            return if products.is_loading {
                ProductOrderScreen::Loading
            } else {
                ProductOrderScreen::Error(PRODUCT_MISSING.to_string())
            };
        };

        ProductOrderScreen::Form(OrderForm {
            price_label: format_amount(product.discount_price),
            available_stock: product.available_stock,
            quantity: self.quantity,
            total_label: format_amount(product.total_for(self.quantity)),
            stock_warning: self.stock_warning(),
            submit_enabled: self.can_submit(),
            error: self.orders.snapshot().state.error.map(|e| e.message),
            name: product.name,
        })
    }
}
