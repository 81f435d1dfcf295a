//! Terminal rendering of the storefront pages.

use std::io::{self, Write};

use storefront::{
    catalog::ProductPage,
    flow::Route,
    formatting::{format_money, format_order_date, format_rupees},
    orders::{FailureRecord, OrderRecord, PaymentMethod},
    pages::{
        COMMON_ISSUES, DELIVERY_NOTE, EmptyState, FAILURE_MESSAGE, FAILURE_TITLE, FailurePage,
        RETRY_HINT, SUCCESS_MESSAGE, SUCCESS_TITLE, SUPPORT_EMAIL, SUPPORT_PHONE, SuccessPage,
    },
};
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Columns},
};

const NOT_PROVIDED: &str = "Not provided";

pub(crate) fn product_page(out: &mut impl Write, page: &ProductPage) -> io::Result<()> {
    let product = page.product();
    let details = page.details();
    let full_stars = details.full_stars();

    writeln!(out, "{}", product.brand)?;
    writeln!(out, "{}", product.name)?;
    writeln!(
        out,
        "{}{} {} ({} reviews)",
        "★".repeat(full_stars),
        "☆".repeat(5 - full_stars.min(5)),
        details.rating,
        details.reviews
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{}  (was {}, {}% off)",
        format_rupees(product.price),
        format_rupees(product.original_price),
        product.discount_percent
    )?;

    if let Ok(savings) = product.savings() {
        writeln!(out, "You save {}", format_money(&savings))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Size:  {}",
        options_line(&details.sizes, page.selected_size())
    )?;
    writeln!(
        out,
        "Color: {}",
        options_line(&details.colors, page.selected_color())
    )?;
    writeln!(out)?;
    writeln!(out, "{}", details.description)?;
    writeln!(out)?;
    writeln!(out, "Key Features:")?;

    for feature in &details.features {
        writeln!(out, "  - {feature}")?;
    }

    let mut specs = Builder::default();

    for spec in &details.specifications {
        specs.push_record([spec.name.as_str(), spec.value.as_str()]);
    }

    writeln!(out)?;
    writeln!(out, "Specifications:")?;
    write_table(out, specs)?;
    writeln!(out)?;
    writeln!(out, "Buy Now - {}", format_rupees(product.price))?;

    Ok(())
}

pub(crate) fn success_page(out: &mut impl Write, page: &SuccessPage) -> io::Result<()> {
    let Some(order) = page.order() else {
        return empty_state(out, page.empty_state());
    };

    writeln!(out, "{SUCCESS_TITLE}")?;
    writeln!(out, "{SUCCESS_MESSAGE}")?;
    writeln!(out)?;

    let mut table = Builder::default();

    table.push_record(["Order ID", order.order_id.as_str()]);
    push_attempt_rows(&mut table, order, "Amount Paid");
    push_customer_rows(&mut table, order);
    push_product_rows(&mut table, order);

    write_table(out, table)?;

    writeln!(out)?;
    writeln!(out, "Expected Delivery: {DELIVERY_NOTE}")?;

    Ok(())
}

pub(crate) fn failure_page(out: &mut impl Write, page: &FailurePage) -> io::Result<()> {
    let Some(failure) = page.failure() else {
        return empty_state(out, page.empty_state());
    };

    writeln!(out, "{FAILURE_TITLE}")?;
    writeln!(out, "{FAILURE_MESSAGE}")?;
    writeln!(out)?;

    write_failure_table(out, failure)?;

    writeln!(out)?;
    writeln!(out, "Common Issues and Solutions:")?;

    for issue in COMMON_ISSUES {
        writeln!(out, "  - {issue}")?;
    }

    writeln!(out)?;
    writeln!(out, "Retry Payment: {RETRY_HINT}")?;

    for method in PaymentMethod::ALL {
        if let Some(label) = page.retry_label(method) {
            writeln!(out, "  {label}")?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Still facing issues? Contact our support team at {SUPPORT_EMAIL} or call {SUPPORT_PHONE}"
    )?;

    Ok(())
}

pub(crate) fn processing(out: &mut impl Write, method: PaymentMethod) -> io::Result<()> {
    writeln!(out, "Processing payment with {method}...")
}

pub(crate) fn route(out: &mut impl Write, route: Route) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "-> {route}")
}

fn empty_state(out: &mut impl Write, state: Option<EmptyState>) -> io::Result<()> {
    if let Some(state) = state {
        writeln!(out, "{}", state.title)?;
        writeln!(out, "{}", state.message)?;
        writeln!(out, "Back to Store: {}", Route::Catalog)?;
    }

    Ok(())
}

fn write_failure_table(out: &mut impl Write, failure: &FailureRecord) -> io::Result<()> {
    let attempt = &failure.attempt;
    let mut table = Builder::default();

    table.push_record(["Transaction ID", attempt.order_id.as_str()]);
    push_attempt_rows(&mut table, attempt, "Amount");
    table.push_record(["Error", failure.error.as_str()]);
    push_customer_rows(&mut table, attempt);
    push_product_rows(&mut table, attempt);

    write_table(out, table)
}

fn push_attempt_rows(table: &mut Builder, record: &OrderRecord, amount_label: &str) {
    table.push_record(["Date".to_string(), format_order_date(record.timestamp)]);
    table.push_record(["Payment Method".to_string(), record.payment_method.to_string()]);
    table.push_record([amount_label.to_string(), format_rupees(record.amount)]);
}

fn push_customer_rows(table: &mut Builder, record: &OrderRecord) {
    let customer = &record.customer;

    table.push_record(["Name", customer.name.as_str()]);
    table.push_record(["Mobile", customer.mobile.as_str()]);
    table.push_record(["Email", customer.email.as_str()]);
    table.push_record(["Address", or_not_provided(&customer.address)]);
    table.push_record(["PIN Code", or_not_provided(&customer.pincode)]);
}

fn push_product_rows(table: &mut Builder, record: &OrderRecord) {
    table.push_record([
        "Product".to_string(),
        format!("{} by {}", record.product.name, record.product.brand),
    ]);
    table.push_record([
        "Size / Color".to_string(),
        format!("{} / {}", record.customer.size, record.customer.color),
    ]);
}

fn write_table(out: &mut impl Write, builder: Builder) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::first(), Color::BOLD);

    writeln!(out, "{table}")
}

fn options_line(options: &[String], selected: &str) -> String {
    options
        .iter()
        .map(|option| {
            if option == selected {
                format!("[{option}]")
            } else {
                option.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() { NOT_PROVIDED } else { value }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn selected_option_is_bracketed() {
        let options = ["7", "8", "9"].map(String::from);

        assert_eq!(options_line(&options, "8"), "7 [8] 9");
        assert_eq!(options_line(&options, "12"), "7 8 9");
    }

    #[test]
    fn product_page_shows_price_savings_and_selection() -> TestResult {
        let mut page = ProductPage::running_shoes()?;
        page.select_color("Red")?;

        let mut out = Vec::new();
        product_page(&mut out, &page)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Premium Running Shoes"));
        assert!(text.contains("₹2999  (was ₹4999, 40% off)"));
        assert!(text.contains("You save ₹2000"));
        assert!(text.contains("Color: Black White Blue [Red]"));
        assert!(text.contains("★★★★☆ 4.5 (1234 reviews)"));
        assert!(text.contains("Buy Now - ₹2999"));

        Ok(())
    }

    #[test]
    fn empty_pages_point_back_to_store() -> TestResult {
        let mut out = Vec::new();

        success_page(&mut out, &SuccessPage::default())?;
        failure_page(&mut out, &FailurePage::default())?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("No Order Found"));
        assert!(text.contains("No Payment Information Found"));
        assert_eq!(text.matches("Back to Store: /").count(), 2);

        Ok(())
    }
}
