//! Success page

use leptos::prelude::*;
use storefront::{
    flow::Route,
    orders::OrderRecord,
    pages::{DELIVERY_NOTE, DEMO_FAILURE_PROMPT, SUCCESS_MESSAGE, SUCCESS_TITLE, SuccessPage},
    payment::PaymentSimulator,
};

use crate::{
    browser::{confirm, download_invoice, href, navigate},
    summary::{EmptyStateView, SummaryCard, attempt_rows, customer_rows, product_rows},
};

/// Download the invoice for the order on show.
fn save_invoice(page: &SuccessPage) -> Result<(), String> {
    let invoice = page
        .invoice()
        .ok_or_else(|| "There is no order to invoice".to_string())?;

    download_invoice(&invoice)
}

/// Stage the demo failure and move to the failure page.
fn show_failure_demo(page: &SuccessPage, payments: &PaymentSimulator) -> Result<(), String> {
    let staged = page
        .stage_failure_demo(payments.store().as_ref(), payments.clock().as_ref())
        .map_err(|error| error.to_string())?;

    if staged.is_some() {
        navigate(Route::Failure)?;
    }

    Ok(())
}

#[component]
fn OrderDetails(order: OrderRecord) -> impl IntoView {
    view! {
        <div class="order-details">
            <SummaryCard title="Order Details" rows=attempt_rows(&order, "Order ID") />
            <SummaryCard title="Customer Information" rows=customer_rows(&order) />
            <SummaryCard title="Product Information" rows=product_rows(&order) />
        </div>
    }
}

/// Success page component.
#[component]
pub(crate) fn SuccessView(
    /// Simulator whose store holds the order.
    payments: PaymentSimulator,
) -> impl IntoView {
    let page = SuccessPage::load(payments.store().as_ref());

    let Some(order) = page.order().cloned() else {
        return page
            .empty_state()
            .map(|state| view! { <EmptyStateView state=state /> })
            .into_any();
    };

    let page = StoredValue::new(page);
    let action_error = RwSignal::new(None::<String>);

    let on_download = move |_| {
        if let Err(error) = page.with_value(save_invoice) {
            action_error.set(Some(error));
        }
    };

    let on_failure_demo = move |_| {
        if !confirm(DEMO_FAILURE_PROMPT) {
            return;
        }

        if let Err(error) = page.with_value(|page| show_failure_demo(page, &payments)) {
            action_error.set(Some(error));
        }
    };

    view! {
        <section class="outcome-page outcome-page-success">
            <h2 class="page-title">{SUCCESS_TITLE}</h2>
            <p class="outcome-message">{SUCCESS_MESSAGE}</p>
            <OrderDetails order=order />
            <section class="delivery-note">
                <h3>"Expected Delivery"</h3>
                <p>{DELIVERY_NOTE}</p>
            </section>
            {move || {
                action_error
                    .get()
                    .map(|message| view! { <p class="form-error" role="alert">{message}</p> })
            }}
            <div class="form-actions">
                <button type="button" class="button button-primary" on:click=on_download>
                    "Download Invoice"
                </button>
                <a class="button button-secondary" href=href(Route::Catalog)>
                    "Continue Shopping"
                </a>
                <button type="button" class="button button-ghost" on:click=on_failure_demo>
                    "View Failure Page Demo"
                </button>
            </div>
        </section>
    }
    .into_any()
}
