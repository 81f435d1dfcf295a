//! Not Found page

use leptos::prelude::*;
use storefront::flow::Route;

use crate::browser::href;

/// Shown for any path that is not a page.
#[component]
pub(crate) fn NotFound() -> impl IntoView {
    view! {
        <section class="empty-state">
            <h2 class="empty-state-title">"Page Not Found"</h2>
            <p class="empty-state-message">"The page you are looking for does not exist."</p>
            <div class="form-actions">
                <a class="button button-primary" href=href(Route::Catalog)>
                    "Back to Store"
                </a>
                <a class="button button-secondary" href=href(Route::Checkout)>
                    "Go to Checkout"
                </a>
            </div>
        </section>
    }
}
