//! Checkout page

use leptos::{prelude::*, task};
use storefront::{
    catalog::ProductPage,
    customer::{CheckoutField, CheckoutForm},
    flow::{CheckoutSession, FlowError, Route},
    formatting::format_rupees,
    orders::PaymentMethod,
    payment::PaymentSimulator,
    products::Product,
};

use crate::browser::{alert, href, navigate};

/// Form label, with a marker on required fields.
fn field_label(field: CheckoutField) -> String {
    let label = match field {
        CheckoutField::Name => "Full Name",
        CheckoutField::Age => "Age",
        CheckoutField::Mobile => "Mobile Number",
        CheckoutField::Email => "Email Address",
        CheckoutField::Address => "Delivery Address",
        CheckoutField::Pincode => "PIN Code",
        CheckoutField::Size => "Size",
        CheckoutField::Color => "Color",
    };

    if field.is_required() {
        format!("{label} *")
    } else {
        label.to_string()
    }
}

fn input_type(field: CheckoutField) -> &'static str {
    match field {
        CheckoutField::Age => "number",
        CheckoutField::Mobile => "tel",
        CheckoutField::Email => "email",
        _ => "text",
    }
}

/// Run one checkout from a fresh session and report where it landed.
async fn place_order(
    payments: PaymentSimulator,
    form: &CheckoutForm,
    product: Product,
    method: PaymentMethod,
) -> Result<Route, FlowError> {
    let mut session = CheckoutSession::new(payments);

    session.open_checkout()?;
    session.submit(form, &product, method).await?;

    Ok(session.route())
}

#[component]
fn TextField(field: CheckoutField, form: RwSignal<CheckoutForm>) -> impl IntoView {
    let id = format!("checkout-{field}");

    view! {
        <label class="form-field" for=id.clone()>
            <span class="form-field-label">{field_label(field)}</span>
            <input
                id=id.clone()
                name=field.name()
                type=input_type(field)
                class="form-input"
                prop:value=move || form.with(|form| form.value(field).to_string())
                on:input=move |event| {
                    form.update(|form| form.update(field, event_target_value(&event)));
                }
            />
        </label>
    }
}

#[component]
fn SelectField(
    field: CheckoutField,
    options: Vec<String>,
    form: RwSignal<CheckoutForm>,
) -> impl IntoView {
    let id = format!("checkout-{field}");

    view! {
        <label class="form-field" for=id.clone()>
            <span class="form-field-label">{field_label(field)}</span>
            <select
                id=id.clone()
                name=field.name()
                class="form-input"
                on:change=move |event| {
                    form.update(|form| form.update(field, event_target_value(&event)));
                }
            >
                {options
                    .into_iter()
                    .map(|option| {
                        let selected = {
                            let option = option.clone();
                            move || form.with(|form| form.value(field) == option)
                        };

                        view! {
                            <option value=option.clone() selected=selected>
                                {option.clone()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
fn MethodPicker(method: RwSignal<PaymentMethod>, pending: RwSignal<bool>) -> impl IntoView {
    view! {
        <fieldset class="method-picker">
            <legend>"Payment Method"</legend>
            {PaymentMethod::ALL
                .into_iter()
                .map(|choice| {
                    view! {
                        <label class="method-option">
                            <input
                                type="radio"
                                name="payment-method"
                                value=choice.as_str()
                                prop:checked=move || method.get() == choice
                                disabled=move || pending.get()
                                on:change=move |_| method.set(choice)
                            />
                            <span>{choice.as_str()}</span>
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

/// Checkout page component.
#[component]
pub(crate) fn CheckoutPage(
    /// Product being bought, with its size and colour options.
    page: ProductPage,
    /// Simulator the order is paid through.
    payments: PaymentSimulator,
) -> impl IntoView {
    let product = *page.product();
    let sizes = page.details().sizes.clone();
    let colors = page.details().colors.clone();

    let form = RwSignal::new(
        CheckoutForm::new()
            .with(CheckoutField::Size, page.selected_size())
            .with(CheckoutField::Color, page.selected_color()),
    );
    let method = RwSignal::new(PaymentMethod::Razorpay);
    let pending = RwSignal::new(false);
    let error_message = RwSignal::new(None::<String>);

    let on_submit = move |_| {
        if pending.get_untracked() {
            return;
        }

        if let Err(error) = form.with_untracked(CheckoutForm::validate) {
            alert(&error.to_string());
            return;
        }

        let snapshot = form.get_untracked();
        let chosen = method.get_untracked();
        let payments = payments.clone();

        error_message.set(None);
        pending.set(true);

        task::spawn_local(async move {
            let placed = place_order(payments, &snapshot, product, chosen).await;

            pending.set(false);

            match placed {
                Ok(route) => {
                    if let Err(error) = navigate(route) {
                        error_message.set(Some(error));
                    }
                }
                Err(FlowError::Validation(error)) => alert(&error.to_string()),
                Err(error) => error_message.set(Some(error.to_string())),
            }
        });
    };

    view! {
        <section class="checkout-page">
            <h2 class="page-title">"Checkout"</h2>
            <div class="checkout-summary">
                <p>{product.name} " by " {product.brand}</p>
                <p class="checkout-total">"Total: " {format_rupees(product.price)}</p>
            </div>
            <form class="checkout-form" on:submit=|event| event.prevent_default()>
                {CheckoutField::ALL
                    .into_iter()
                    .map(|field| match field {
                        CheckoutField::Size => {
                            view! { <SelectField field=field options=sizes.clone() form=form /> }
                                .into_any()
                        }
                        CheckoutField::Color => {
                            view! { <SelectField field=field options=colors.clone() form=form /> }
                                .into_any()
                        }
                        _ => view! { <TextField field=field form=form /> }.into_any(),
                    })
                    .collect_view()}
                <MethodPicker method=method pending=pending />
                {move || {
                    error_message
                        .get()
                        .map(|message| view! { <p class="form-error" role="alert">{message}</p> })
                }}
                <div class="form-actions">
                    <a class="button button-secondary" href=href(Route::Catalog)>
                        "Back to Product"
                    </a>
                    <button
                        type="submit"
                        class="button button-primary"
                        disabled=move || pending.get()
                        on:click=on_submit
                    >
                        {move || {
                            if pending.get() {
                                view! {
                                    <span class="spinner" aria-hidden="true"></span>
                                    <span>"Processing Payment..."</span>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <span>
                                        "Pay " {format_rupees(product.price)} " with "
                                        {move || method.get().as_str()}
                                    </span>
                                }
                                    .into_any()
                            }
                        }}
                    </button>
                </div>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_label_marks_required_fields() {
        assert_eq!(field_label(CheckoutField::Name), "Full Name *");
        assert_eq!(field_label(CheckoutField::Email), "Email Address *");
        assert_eq!(field_label(CheckoutField::Address), "Delivery Address");
        assert_eq!(field_label(CheckoutField::Pincode), "PIN Code");
    }

    #[test]
    fn test_input_type_matches_field() {
        assert_eq!(input_type(CheckoutField::Mobile), "tel");
        assert_eq!(input_type(CheckoutField::Age), "number");
        assert_eq!(input_type(CheckoutField::Name), "text");
    }
}
