//! Storefront Demo Application

use leptos::prelude::*;
use storefront::{catalog::ProductPage, flow::Route, payment::PaymentSimulator};

mod browser;
mod catalog;
mod checkout;
mod failure;
mod not_found;
mod success;
mod summary;

const STORE_NAME: &str = "SportMax Store";

/// View for the page at `route`.
fn page_view(route: Route, product: ProductPage, payments: PaymentSimulator) -> AnyView {
    match route {
        Route::Catalog => view! { <catalog::CatalogPage page=product /> }.into_any(),
        Route::Checkout => {
            view! { <checkout::CheckoutPage page=product payments=payments /> }.into_any()
        }
        Route::Success => view! { <success::SuccessView payments=payments /> }.into_any(),
        Route::Failure => view! { <failure::FailureView payments=payments /> }.into_any(),
        Route::NotFound => view! { <not_found::NotFound /> }.into_any(),
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="site-header">
            <a class="site-header-brand" href=browser::href(Route::Catalog)>
                {STORE_NAME}
            </a>
        </header>
    }
}

/// Main demo app shell.
#[component]
fn App() -> impl IntoView {
    match ProductPage::running_shoes() {
        Ok(product) => {
            let route = browser::current_route();
            let payments = browser::payment_simulator();

            view! {
                <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                    <Header />
                    <div class="mx-auto max-w-5xl">{page_view(route, product, payments)}</div>
                </main>
            }
            .into_any()
        }
        Err(error) => view! {
            <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                <Header />
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error.to_string()}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

/// Main function
fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
