//! Invoice
//!
//! Plain-text invoice offered for download on the success page.

use std::fmt;

use crate::{
    formatting::{format_order_date, format_rupees},
    orders::OrderRecord,
};

const NOT_PROVIDED: &str = "Not provided";

/// Invoice for one order.
#[derive(Debug, Clone, Copy)]
pub struct Invoice<'a> {
    order: &'a OrderRecord,
}

impl<'a> Invoice<'a> {
    /// Invoice for `order`.
    pub fn new(order: &'a OrderRecord) -> Self {
        Self { order }
    }

    /// Download file name, `invoice-<orderId>.txt`.
    pub fn file_name(&self) -> String {
        format!("invoice-{}.txt", self.order.order_id)
    }

    /// Invoice text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        let customer = &order.customer;

        writeln!(f, "INVOICE - {}", order.order_id)?;
        writeln!(f, "====================================")?;
        writeln!(f)?;
        writeln!(f, "Order Details:")?;
        writeln!(f, "- Order ID: {}", order.order_id)?;
        writeln!(f, "- Date: {}", format_order_date(order.timestamp))?;
        writeln!(f, "- Payment Method: {}", order.payment_method)?;
        writeln!(f)?;
        writeln!(f, "Customer Information:")?;
        writeln!(f, "- Name: {}", customer.name)?;
        writeln!(f, "- Age: {}", customer.age)?;
        writeln!(f, "- Mobile: {}", customer.mobile)?;
        writeln!(f, "- Email: {}", customer.email)?;
        writeln!(f, "- Address: {}", or_not_provided(&customer.address))?;
        writeln!(f, "- PIN Code: {}", or_not_provided(&customer.pincode))?;
        writeln!(f)?;
        writeln!(f, "Product Information:")?;
        writeln!(f, "- Product: {}", order.product.name)?;
        writeln!(f, "- Brand: {}", order.product.brand)?;
        writeln!(f, "- Size: {}", customer.size)?;
        writeln!(f, "- Color: {}", customer.color)?;
        writeln!(f, "- Amount Paid: {}", format_rupees(order.amount))?;
        writeln!(f)?;
        writeln!(f, "Thank you for shopping with SportMax Store!")
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() { NOT_PROVIDED } else { value }
}
