//! Failure page

use leptos::{prelude::*, task};
use storefront::{
    flow::{CheckoutSession, FlowError, Route},
    orders::{FailureRecord, OrderRecord, PaymentMethod},
    pages::{
        COMMON_ISSUES, FAILURE_MESSAGE, FAILURE_TITLE, FailurePage, RETRY_HINT, SUPPORT_EMAIL,
        SUPPORT_PHONE,
    },
    payment::{PaymentOutcome, PaymentSimulator},
};

use crate::{
    browser::{href, navigate},
    summary::{EmptyStateView, Row, SummaryCard, attempt_rows, customer_rows, product_rows},
};

/// Retry a failed attempt from a session resumed on the failure page.
async fn retry_payment(
    payments: PaymentSimulator,
    failure: &FailureRecord,
    method: PaymentMethod,
) -> Result<PaymentOutcome, FlowError> {
    CheckoutSession::at_failure_page(payments)
        .retry(failure, method)
        .await
}

fn transaction_rows(failure: &FailureRecord) -> Vec<Row> {
    let mut rows = attempt_rows(&failure.attempt, "Transaction ID");

    rows.push(("Error", failure.error.clone()));
    rows
}

#[component]
fn AttemptDetails(attempt: OrderRecord, rows: Vec<Row>) -> impl IntoView {
    view! {
        <div class="order-details">
            <SummaryCard title="Transaction Details" rows=rows />
            <SummaryCard title="Customer Information" rows=customer_rows(&attempt) />
            <SummaryCard title="Product Information" rows=product_rows(&attempt) />
        </div>
    }
}

#[component]
fn RetryButtons(
    page: RwSignal<FailurePage>,
    payments: PaymentSimulator,
    pending: RwSignal<bool>,
    retry_error: RwSignal<Option<String>>,
) -> impl IntoView {
    PaymentMethod::ALL
        .into_iter()
        .map(|method| {
            let payments = payments.clone();

            let on_retry = move |_| {
                if pending.get_untracked() {
                    return;
                }

                let Some(failure) = page.with_untracked(|page| page.failure().cloned()) else {
                    return;
                };

                let payments = payments.clone();

                retry_error.set(None);
                pending.set(true);

                task::spawn_local(async move {
                    let result = retry_payment(payments, &failure, method).await;

                    pending.set(false);

                    match result {
                        Ok(outcome) => {
                            page.update(|page| page.settle(&outcome));

                            if outcome.is_success() {
                                if let Err(error) = navigate(outcome.route()) {
                                    retry_error.set(Some(error));
                                }
                            }
                        }
                        Err(error) => retry_error.set(Some(error.to_string())),
                    }
                });
            };

            view! {
                <button
                    type="button"
                    class="button button-primary"
                    disabled=move || pending.get()
                    on:click=on_retry
                >
                    {move || {
                        if pending.get() {
                            view! {
                                <span class="spinner" aria-hidden="true"></span>
                                <span>"Processing..."</span>
                            }
                                .into_any()
                        } else {
                            page.with(|page| page.retry_label(method)).into_any()
                        }
                    }}
                </button>
            }
        })
        .collect_view()
}

/// Failure page component.
#[component]
pub(crate) fn FailureView(
    /// Simulator whose store holds the failed attempt.
    payments: PaymentSimulator,
) -> impl IntoView {
    let loaded = FailurePage::load(payments.store().as_ref());

    if let Some(state) = loaded.empty_state() {
        return view! { <EmptyStateView state=state /> }.into_any();
    }

    let page = RwSignal::new(loaded);
    let pending = RwSignal::new(false);
    let retry_error = RwSignal::new(None::<String>);

    view! {
        <section class="outcome-page outcome-page-failure">
            <h2 class="page-title">{FAILURE_TITLE}</h2>
            <p class="outcome-message">{FAILURE_MESSAGE}</p>
            {move || {
                page.with(|page| {
                    page.failure()
                        .map(|failure| {
                            view! {
                                <AttemptDetails
                                    attempt=failure.attempt.clone()
                                    rows=transaction_rows(failure)
                                />
                            }
                        })
                })
            }}
            <section class="common-issues">
                <h3>"Common Issues and Solutions"</h3>
                <ul>
                    {COMMON_ISSUES
                        .into_iter()
                        .map(|issue| view! { <li>{issue}</li> })
                        .collect_view()}
                </ul>
            </section>
            <section class="retry-payment">
                <h3>"Retry Payment"</h3>
                <p>{RETRY_HINT}</p>
                {move || {
                    retry_error
                        .get()
                        .map(|message| view! { <p class="form-error" role="alert">{message}</p> })
                }}
                <div class="form-actions">
                    <RetryButtons
                        page=page
                        payments=payments
                        pending=pending
                        retry_error=retry_error
                    />
                    <a class="button button-secondary" href=href(Route::Checkout)>
                        "Back to Checkout"
                    </a>
                </div>
            </section>
            <p class="support-note">
                "Still facing issues? Contact our support team at " {SUPPORT_EMAIL} " or call "
                {SUPPORT_PHONE}
            </p>
        </section>
    }
    .into_any()
}
