//! Product page

use leptos::prelude::*;
use storefront::{
    catalog::{ProductDetails, ProductPage},
    flow::Route,
    formatting::{format_money, format_rupees},
};

use crate::browser::href;

/// Filled and empty stars for a rating out of five.
fn rating_stars(details: &ProductDetails) -> String {
    let full = details.full_stars().min(5);

    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

#[component]
fn OptionPicker(
    label: &'static str,
    options: Vec<String>,
    selected: Signal<String>,
    on_pick: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="option-picker">
            <h3 class="option-picker-label">{label}</h3>
            <div class="option-picker-choices">
                {options
                    .into_iter()
                    .map(|option| {
                        let is_selected = {
                            let option = option.clone();
                            move || selected.with(|current| *current == option)
                        };
                        let picked = option.clone();

                        view! {
                            <button
                                type="button"
                                class="option-button"
                                class:option-button-selected=is_selected
                                on:click=move |_| on_pick.run(picked.clone())
                            >
                                {option}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Product page component.
#[component]
pub(crate) fn CatalogPage(
    /// Product and its display details.
    page: ProductPage,
) -> impl IntoView {
    let product = *page.product();
    let details = page.details().clone();
    let stars = rating_stars(&details);
    let savings = product.savings().ok().map(|savings| format_money(&savings));
    let page = RwSignal::new(page);
    let selection_error = RwSignal::new(None::<String>);

    let selected_size = Signal::derive(move || page.with(|page| page.selected_size().to_string()));
    let selected_color =
        Signal::derive(move || page.with(|page| page.selected_color().to_string()));

    let pick_size = Callback::new(move |size: String| {
        page.update(|page| {
            if let Err(error) = page.select_size(&size) {
                selection_error.set(Some(error.to_string()));
            }
        });
    });

    let pick_color = Callback::new(move |color: String| {
        page.update(|page| {
            if let Err(error) = page.select_color(&color) {
                selection_error.set(Some(error.to_string()));
            }
        });
    });

    view! {
        <section class="product-page">
            <div class="product-summary">
                <p class="product-brand">{product.brand}</p>
                <h2 class="product-name">{product.name}</h2>
                <p class="product-rating">
                    <span aria-hidden="true">{stars}</span>
                    " "
                    {details.rating}
                    " ("
                    {details.reviews}
                    " reviews)"
                </p>
                <p class="product-price">
                    <span class="product-price-current">{format_rupees(product.price)}</span>
                    <span class="product-price-original">
                        {format_rupees(product.original_price)}
                    </span>
                    <span class="product-price-discount">
                        {product.discount_percent}
                        "% off"
                    </span>
                </p>
                {savings
                    .map(|savings| {
                        view! { <p class="product-savings">"You save " {savings}</p> }
                    })}
            </div>

            <OptionPicker
                label="Size"
                options=details.sizes.clone()
                selected=selected_size
                on_pick=pick_size
            />
            <OptionPicker
                label="Color"
                options=details.colors.clone()
                selected=selected_color
                on_pick=pick_color
            />
            {move || {
                selection_error
                    .get()
                    .map(|message| view! { <p class="form-error" role="alert">{message}</p> })
            }}

            <a class="button button-primary product-buy" href=href(Route::Checkout)>
                "Buy Now - "
                {format_rupees(product.price)}
            </a>

            <div class="product-description">
                <p>{details.description.clone()}</p>
                <h3>"Key Features"</h3>
                <ul class="product-features">
                    {details
                        .features
                        .iter()
                        .map(|feature| view! { <li>{feature.clone()}</li> })
                        .collect_view()}
                </ul>
                <h3>"Specifications"</h3>
                <dl class="product-specs">
                    {details
                        .specifications
                        .iter()
                        .map(|spec| {
                            view! {
                                <div class="product-spec">
                                    <dt>{spec.name.clone()}</dt>
                                    <dd>{spec.value.clone()}</dd>
                                </div>
                            }
                        })
                        .collect_view()}
                </dl>
            </div>
        </section>
    }
}
