//! Represents a sellable item as returned by the catalogue endpoints.
//!
//! Products are read-only on the client. They are replaced wholesale whenever the
//! catalogue is fetched again, and the only rules attached to them are the ones the
//! order form needs.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::error::ErrorCode;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub base_price: i64,
    pub discount_price: i64,
    pub available_stock: i32,
    pub available: bool,
    pub created_at: NaiveDateTime,
}

/// Why a quantity cannot be ordered for a given product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityViolation {
    BelowMinimum,
    ExceedsStock { requested: i32, available: i32 },
    NotAvailable,
}

impl QuantityViolation {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuantityViolation::BelowMinimum => ErrorCode::QuantityInvalid,
            QuantityViolation::ExceedsStock { .. } => ErrorCode::OutOfStock,
            QuantityViolation::NotAvailable => ErrorCode::ProductNotAvailable,
        }
    }

    pub fn message(&self) -> String {
        match self {
            QuantityViolation::BelowMinimum => "Quantity must be at least 1.".to_string(),
            QuantityViolation::ExceedsStock {
                requested,
                available,
            } => format!("Not enough stock: requested {requested}, available {available}."),
            QuantityViolation::NotAvailable => "This product is not available for sale.".to_string(),
        }
    }
}

impl Product {
    /// A product can be ordered only while it is on sale and has stock left.
    pub fn is_orderable(&self) -> bool {
        self.available && self.available_stock > 0
    }

    /// Total price for `quantity` units at the discount price.
    pub fn total_for(&self, quantity: i32) -> i64 {
        self.discount_price.saturating_mul(i64::from(quantity))
    }

    /// Checks `quantity` against the orderable range `[1, available_stock]`.
    pub fn check_quantity(&self, quantity: i32) -> Result<(), QuantityViolation> {
        if !self.is_orderable() {
            return Err(QuantityViolation::NotAvailable);
        }
        if quantity < 1 {
            return Err(QuantityViolation::BelowMinimum);
        }
        if quantity > self.available_stock {
            return Err(QuantityViolation::ExceedsStock {
                requested: quantity,
                available: self.available_stock,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vacuum() -> Product {
        Product {
            product_id: ProductId(101),
            name: "Wireless Vacuum Premium".to_string(),
            base_price: 150_000,
            discount_price: 129_000,
            available_stock: 50,
            available: true,
            created_at: NaiveDate::from_ymd_opt(2025, 12, 4)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_total_uses_discount_price() {
        let product = vacuum();
        assert_eq!(product.total_for(1), 129_000);
        assert_eq!(product.total_for(2), 258_000);
        assert_eq!(product.total_for(50), 6_450_000);
    }

    #[test]
    fn test_quantity_range_edges() {
        let product = vacuum();
        assert_eq!(product.check_quantity(1), Ok(()));
        assert_eq!(product.check_quantity(50), Ok(()));
        assert_eq!(product.check_quantity(0), Err(QuantityViolation::BelowMinimum));
        assert_eq!(product.check_quantity(-3), Err(QuantityViolation::BelowMinimum));
        assert_eq!(
            product.check_quantity(51),
            Err(QuantityViolation::ExceedsStock {
                requested: 51,
                available: 50
            })
        );
    }

    #[test]
    fn test_sold_out_or_unavailable_product_is_not_orderable() {
        let mut sold_out = vacuum();
        sold_out.available_stock = 0;
        assert!(!sold_out.is_orderable());
        assert_eq!(sold_out.check_quantity(1), Err(QuantityViolation::NotAvailable));

        let mut hidden = vacuum();
        hidden.available = false;
        assert!(!hidden.is_orderable());
        assert_eq!(QuantityViolation::NotAvailable.code(), ErrorCode::ProductNotAvailable);
    }

    #[test]
    fn test_decodes_camel_case_payload() {
        let json = r#"{
            "productId": 101,
            "name": "Wireless Vacuum Premium",
            "basePrice": 150000,
            "discountPrice": 129000,
            "availableStock": 50,
            "available": true,
            "createdAt": "2025-12-04T10:00:00"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, vacuum());
        assert_eq!(product.product_id.to_string(), "101");
    }
}
