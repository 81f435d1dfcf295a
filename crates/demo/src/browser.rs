//! Browser glue: local storage, timers, randomness, dialogs and navigation.
//!
//! Every helper has a native fallback so the crate builds and tests off the
//! web; the fallbacks keep state in memory and never block.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
#[cfg(not(target_arch = "wasm32"))]
use leptos::task;
use storefront::{
    flow::Route,
    invoice::Invoice,
    payment::{Delay, PaymentSimulator},
};
#[cfg(target_arch = "wasm32")]
use storefront::{
    payment::{Clock, RandomSource},
    store::{OrderStore, Slot, StoreError},
};
#[cfg(not(target_arch = "wasm32"))]
use storefront::{
    payment::{SystemClock, ThreadRandom},
    store::MemoryStore,
};

/// Simulator wired to the browser's storage, timer, clock and RNG.
#[cfg(target_arch = "wasm32")]
pub(crate) fn payment_simulator() -> PaymentSimulator {
    PaymentSimulator::new(
        Arc::new(LocalStorageStore),
        Arc::new(MathRandom),
        Arc::new(BrowserClock),
        Arc::new(TimeoutDelay),
    )
}

/// Simulator backed by an in-memory store.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn payment_simulator() -> PaymentSimulator {
    PaymentSimulator::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ThreadRandom),
        Arc::new(SystemClock),
        Arc::new(TimeoutDelay),
    )
}

/// Route for the page the browser is on.
#[cfg(target_arch = "wasm32")]
pub(crate) fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map_or(Route::Catalog, |path| Route::from_path(&path))
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn current_route() -> Route {
    Route::Catalog
}

/// Link target for a route. Not Found links back to the store.
pub(crate) fn href(route: Route) -> &'static str {
    route.path().unwrap_or("/")
}

/// Load `route` as a fresh page.
#[cfg(target_arch = "wasm32")]
pub(crate) fn navigate(route: Route) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "Window is unavailable".to_string())?;

    window
        .location()
        .set_href(href(route))
        .map_err(|error| js_value_message(error, "Failed to navigate"))
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn navigate(_route: Route) -> Result<(), String> {
    Ok(())
}

/// Show a blocking message.
#[cfg(target_arch = "wasm32")]
pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn alert(_message: &str) {}

/// Ask the shopper to confirm. Anything but an explicit OK is a no.
#[cfg(target_arch = "wasm32")]
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window().is_some_and(|window| window.confirm_with_message(message).unwrap_or(false))
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn confirm(_message: &str) -> bool {
    false
}

/// Order store over `window.localStorage`, keyed by slot.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("Window is unavailable".to_string()))?;

        window
            .local_storage()
            .map_err(|error| {
                StoreError::Unavailable(js_value_message(error, "Local storage is blocked"))
            })?
            .ok_or_else(|| StoreError::Unavailable("Local storage is unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl OrderStore for LocalStorageStore {
    fn get(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(slot.key()).map_err(|error| {
            StoreError::Unavailable(js_value_message(error, "Failed to read local storage"))
        })
    }

    fn set(&self, slot: Slot, value: String) -> Result<(), StoreError> {
        Self::storage()?.set_item(slot.key(), &value).map_err(|error| {
            StoreError::Unavailable(js_value_message(error, "Failed to write local storage"))
        })
    }

    fn clear(&self, slot: Slot) -> Result<(), StoreError> {
        Self::storage()?.remove_item(slot.key()).map_err(|error| {
            StoreError::Unavailable(js_value_message(error, "Failed to clear local storage"))
        })
    }
}

/// `Math.random()`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl RandomSource for MathRandom {
    fn next_unit(&self) -> f64 {
        js_sys::Math::random()
    }
}

/// `Date.now()`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BrowserClock;

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Date.now() is a whole number of milliseconds"
    )]
    fn now(&self) -> jiff::Timestamp {
        let millis = js_sys::Date::now() as i64;

        jiff::Timestamp::from_millisecond(millis).unwrap_or(jiff::Timestamp::UNIX_EPOCH)
    }
}

/// Waits on `setTimeout`, leaving the page responsive.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TimeoutDelay;

#[async_trait(?Send)]
impl Delay for TimeoutDelay {
    async fn wait(&self, duration: Duration) {
        let delay_ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);

        wait_for_timeout(delay_ms).await;
    }
}

#[cfg(target_arch = "wasm32")]
async fn wait_for_timeout(delay_ms: i32) {
    use js_sys::{Function, Promise};
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};
    use wasm_bindgen_futures::JsFuture;

    let mut executor = move |resolve: Function, _reject: Function| {
        let Some(window) = web_sys::window() else {
            let _ = resolve.call0(&JsValue::NULL);
            return;
        };

        let callback = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });

        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms,
        );
    };

    let promise = Promise::new(&mut executor);
    let _ = JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn wait_for_timeout(_delay_ms: i32) {
    task::tick().await;
}

/// Content type the invoice download is offered with.
#[cfg(any(target_arch = "wasm32", test))]
const INVOICE_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// Offer the invoice to the shopper as `invoice-<orderId>.txt`.
#[cfg(target_arch = "wasm32")]
pub(crate) fn download_invoice(invoice: &Invoice<'_>) -> Result<(), String> {
    let url = invoice_object_url(&invoice.render())?;
    let clicked = click_download_link(&url, &invoice.file_name());

    // The object URL is released even when the click could not be made.
    let released = web_sys::Url::revoke_object_url(&url)
        .map_err(|error| js_value_message(error, "Failed to release invoice URL"));

    clicked.and(released)
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn download_invoice(invoice: &Invoice<'_>) -> Result<(), String> {
    Err(format!("Cannot save {} outside a browser", invoice.file_name()))
}

/// Object URL for a blob holding the invoice text.
#[cfg(target_arch = "wasm32")]
fn invoice_object_url(text: &str) -> Result<String, String> {
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(INVOICE_MIME_TYPE);

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(text));

    web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .and_then(|blob| web_sys::Url::create_object_url_with_blob(&blob))
        .map_err(|error| js_value_message(error, "Failed to prepare the invoice"))
}

/// Click a detached `<a download>` pointing at `url`.
#[cfg(target_arch = "wasm32")]
fn click_download_link(url: &str, file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "Document is unavailable".to_string())?;

    let link: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|error| js_value_message(error, "Failed to create download link"))?
        .dyn_into()
        .map_err(|_element| "Download link is not an anchor".to_string())?;

    link.set_href(url);
    link.set_download(file_name);
    link.set_type(INVOICE_MIME_TYPE);
    link.click();

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn js_value_message(error: wasm_bindgen::JsValue, fallback: &str) -> String {
    error.as_string().unwrap_or_else(|| fallback.to_string())
}
