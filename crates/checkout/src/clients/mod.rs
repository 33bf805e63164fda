//! Type-safe wrappers around [`StoreClient`](store_framework::StoreClient).

pub mod order_client;
pub mod payment_client;
pub mod product_client;

pub use order_client::*;
pub use payment_client::*;
pub use product_client::*;
