//! # Screens
//!
//! View-models for the three checkout screens. Each one reads its containers through the
//! public clients, renders the current snapshots into a plain screen value and turns user
//! input into container calls. Screens navigate by returning a [`Route`].
//!
//! | Route | View |
//! |-------|------|
//! | `/products` | [`ProductListView`] |
//! | `/products/{id}` | [`ProductOrderView`] |
//! | `/orders/{orderId}/complete` | [`OrderCompleteView`] |

pub mod format;
pub mod order_complete;
pub mod product_list;
pub mod product_order;
pub mod route;

pub use format::format_amount;
pub use order_complete::{OrderCompleteScreen, OrderCompleteView};
pub use product_list::{ProductCard, ProductListScreen, ProductListView};
pub use product_order::{OrderForm, ProductOrderScreen, ProductOrderView};
pub use route::{Route, UnknownRoute};
