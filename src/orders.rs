//! Order and failure records.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{customer::CustomerInfo, products::ProductSnapshot};

/// Order identifier: `ORD` followed by the attempt's epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Identifier for an attempt made at `at`.
    pub fn at(at: Timestamp) -> Self {
        Self(format!("ORD{}", at.as_millisecond()))
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Razorpay
    Razorpay,
    /// Paytm
    Paytm,
}

impl PaymentMethod {
    /// Every method, in button order.
    pub const ALL: [Self; 2] = [Self::Razorpay, Self::Paytm];

    /// Display name, also the persisted value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Razorpay => "Razorpay",
            Self::Paytm => "Paytm",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a payment method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}

/// Summary of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order identifier
    pub order_id: OrderId,

    /// Customer details, stored inline
    #[serde(flatten)]
    pub customer: CustomerInfo,

    /// Product bought
    pub product: ProductSnapshot,

    /// Method charged
    pub payment_method: PaymentMethod,

    /// Amount charged, in whole rupees
    pub amount: u64,

    /// When the attempt settled
    pub timestamp: Timestamp,
}

impl OrderRecord {
    /// Record for an attempt settled at `at`, charging the product price.
    pub fn placed(
        customer: CustomerInfo,
        product: ProductSnapshot,
        payment_method: PaymentMethod,
        at: Timestamp,
    ) -> Self {
        Self {
            order_id: OrderId::at(at),
            amount: product.price,
            customer,
            product,
            payment_method,
            timestamp: at,
        }
    }
}

/// Summary of a failed payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The attempt that failed
    #[serde(flatten)]
    pub attempt: OrderRecord,

    /// Why it failed
    pub error: String,
}

impl FailureRecord {
    /// Record a failed attempt.
    pub fn new(attempt: OrderRecord, error: impl Into<String>) -> Self {
        Self {
            attempt,
            error: error.into(),
        }
    }

    /// Customer details the attempt was made with.
    pub fn customer(&self) -> &CustomerInfo {
        &self.attempt.customer
    }

    /// Product the attempt was for.
    pub fn product(&self) -> &ProductSnapshot {
        &self.attempt.product
    }
}
