//! Error codes and the structured error body returned by the checkout API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Machine-readable error code carried in every API error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // order creation
    ProductNotFound,
    ProductNotAvailable,
    OutOfStock,
    QuantityInvalid,
    // payment approval
    OrderNotFound,
    OrderNotPayable,
    AmountMismatch,
    PgApprovalFailed,
    PaymentAlreadyApproved,
    // generic server failures
    ValidationFailed,
    InternalServerError,
    /// Anything that is not a recognised API error (transport, decoding, unknown code).
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorCode::ProductNotAvailable => "PRODUCT_NOT_AVAILABLE",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::QuantityInvalid => "QUANTITY_INVALID",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::OrderNotPayable => "ORDER_NOT_PAYABLE",
            ErrorCode::AmountMismatch => "AMOUNT_MISMATCH",
            ErrorCode::PgApprovalFailed => "PG_APPROVAL_FAILED",
            ErrorCode::PaymentAlreadyApproved => "PAYMENT_ALREADY_APPROVED",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "PRODUCT_NOT_FOUND" => ErrorCode::ProductNotFound,
            "PRODUCT_NOT_AVAILABLE" => ErrorCode::ProductNotAvailable,
            "OUT_OF_STOCK" => ErrorCode::OutOfStock,
            "QUANTITY_INVALID" => ErrorCode::QuantityInvalid,
            "ORDER_NOT_FOUND" => ErrorCode::OrderNotFound,
            "ORDER_NOT_PAYABLE" => ErrorCode::OrderNotPayable,
            "AMOUNT_MISMATCH" => ErrorCode::AmountMismatch,
            "PG_APPROVAL_FAILED" => ErrorCode::PgApprovalFailed,
            "PAYMENT_ALREADY_APPROVED" => ErrorCode::PaymentAlreadyApproved,
            "VALIDATION_FAILED" => ErrorCode::ValidationFailed,
            "INTERNAL_SERVER_ERROR" => ErrorCode::InternalServerError,
            _ => ErrorCode::UnknownError,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ErrorCode::from(code.as_str()))
    }
}

/// A failure as shown to the user: code, human message and optional detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Wraps a failure that never produced an API error body.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownError, message)
    }
}
