//! Low-level wasm-bindgen bindings to Stripe.js v3.
//!
//! Exposes the raw Stripe.js handles (`Stripe`, `Elements`, `CardElement`)
//! and their methods, with async calls surfaced as `js_sys::Promise`.
//! Typed wrappers live in `client.rs`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Function, Promise};

#[wasm_bindgen]
extern "C" {
    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    #[derive(Debug, Clone)]
    pub type Stripe;

    /// Raw Elements factory handle.
    #[wasm_bindgen(js_name = Elements)]
    #[derive(Debug, Clone)]
    pub type Elements;

    /// Raw card element UI handle.
    #[wasm_bindgen(js_name = CardElement)]
    #[derive(Debug, Clone)]
    pub type CardElement;

    /// Construct a new `Stripe` handle from a publishable key.
    ///
    /// ```js
    ///   const stripe = Stripe("pk_test_...");
    /// ```
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    pub fn new_stripe(publishable_key: &str) -> Stripe;

    /// `stripe.elements(options)` → `Elements`
    #[wasm_bindgen(method, catch, js_name = elements)]
    pub fn elements(this: &Stripe, options: JsValue) -> Result<Elements, JsValue>;

    /// `elements.create("card", options)` → `CardElement`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &Elements,
        element_type: &str,
        options: JsValue,
    ) -> Result<CardElement, JsValue>;

    /// `cardElement.mount(selector)` → `()`
    #[wasm_bindgen(method, catch, js_name = mount)]
    pub fn mount(this: &CardElement, selector: &str) -> Result<(), JsValue>;

    /// `cardElement.unmount()` → `()`
    #[wasm_bindgen(method, catch, js_name = unmount)]
    pub fn unmount(this: &CardElement) -> Result<(), JsValue>;

    /// `cardElement.on("change", handler)` — subscribe to element events.
    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &CardElement, event_type: &str, handler: &Function);

    /// `stripe.createToken(cardElement)` → JS `Promise`
    ///
    /// The promise resolves with `{token: {...}}` or `{error: {...}}`;
    /// card failures never reject it.
    #[wasm_bindgen(method, catch, js_name = createToken)]
    pub fn create_token(this: &Stripe, card: &CardElement) -> Result<Promise, JsValue>;
}
