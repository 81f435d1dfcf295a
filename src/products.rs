//! Products

use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};

/// The one product the store sells.
pub const RUNNING_SHOES: Product = Product {
    name: "Premium Running Shoes",
    brand: "SportMax",
    price: 2999,
    original_price: 4999,
    discount_percent: 40,
};

/// Product
///
/// Prices are whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Product name
    pub name: &'static str,

    /// Brand name
    pub brand: &'static str,

    /// Selling price
    pub price: u64,

    /// Price before discount
    pub original_price: u64,

    /// Advertised discount, in percent points
    pub discount_percent: u8,
}

impl Product {
    /// Currency every price is quoted in.
    pub fn currency(&self) -> &'static Currency {
        iso::INR
    }

    /// Selling price as money.
    pub fn price_money(&self) -> Money<'static, Currency> {
        Money::from_major(to_major(self.price), self.currency())
    }

    /// Price before discount as money.
    pub fn original_price_money(&self) -> Money<'static, Currency> {
        Money::from_major(to_major(self.original_price), self.currency())
    }

    /// Amount saved against the original price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'static, Currency>, MoneyError> {
        self.original_price_money().sub(self.price_money())
    }

    /// Owned copy of the product, as embedded in order records.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            price: self.price,
            original_price: self.original_price,
            discount: self.discount_percent,
        }
    }
}

/// Product as persisted inside order and failure records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Selling price at the time of the attempt
    pub price: u64,

    /// Price before discount
    pub original_price: u64,

    /// Discount in percent points
    pub discount: u8,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        product.snapshot()
    }
}

fn to_major(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
