//! Domain types shared by the API client, the containers and the views.

pub mod error;
pub mod order;
pub mod payment;
pub mod product;

pub use error::*;
pub use order::*;
pub use payment::*;
pub use product::*;
