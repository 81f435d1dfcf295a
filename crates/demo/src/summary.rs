//! Order summary tables shared by the outcome pages.

use leptos::prelude::*;
use storefront::{
    flow::Route,
    formatting::{format_order_date, format_rupees},
    orders::OrderRecord,
    pages::EmptyState,
};

use crate::browser::href;

const NOT_PROVIDED: &str = "Not provided";

/// Labelled value shown in a summary table.
pub(crate) type Row = (&'static str, String);

/// Id, date, method and amount of an attempt.
pub(crate) fn attempt_rows(record: &OrderRecord, id_label: &'static str) -> Vec<Row> {
    vec![
        (id_label, record.order_id.to_string()),
        ("Date", format_order_date(record.timestamp)),
        ("Payment Method", record.payment_method.to_string()),
        ("Amount", format_rupees(record.amount)),
    ]
}

/// Who the order is for and where it goes.
pub(crate) fn customer_rows(record: &OrderRecord) -> Vec<Row> {
    let customer = &record.customer;

    vec![
        ("Name", customer.name.clone()),
        ("Age", customer.age.clone()),
        ("Mobile", customer.mobile.clone()),
        ("Email", customer.email.clone()),
        ("Address", or_not_provided(&customer.address)),
        ("PIN Code", or_not_provided(&customer.pincode)),
    ]
}

/// What was bought.
pub(crate) fn product_rows(record: &OrderRecord) -> Vec<Row> {
    vec![
        ("Product", record.product.name.clone()),
        ("Brand", record.product.brand.clone()),
        ("Size", record.customer.size.clone()),
        ("Color", record.customer.color.clone()),
    ]
}

fn or_not_provided(value: &str) -> String {
    if value.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

/// Titled table of rows.
#[component]
pub(crate) fn SummaryCard(title: &'static str, rows: Vec<Row>) -> impl IntoView {
    view! {
        <section class="summary-card">
            <h3 class="summary-card-title">{title}</h3>
            <dl class="summary-card-rows">
                {rows
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div class="summary-card-row">
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}

/// Placeholder for a page whose record is missing.
#[component]
pub(crate) fn EmptyStateView(state: EmptyState) -> impl IntoView {
    view! {
        <section class="empty-state">
            <h2 class="empty-state-title">{state.title}</h2>
            <p class="empty-state-message">{state.message}</p>
            <a class="button button-primary" href=href(Route::Catalog)>
                "Back to Store"
            </a>
        </section>
    }
}
