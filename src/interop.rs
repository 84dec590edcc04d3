//! Yew hook loading Stripe.js v3 at runtime, without inline JS.
//!
//! [`use_stripe_js`] injects a single
//! `<script id="stripe-js-v3" src="https://js.stripe.com/v3/" defer>` into
//! `<head>` on first use, returns `false` until the script's `load` event
//! fires, then `true` on every later render. Every component calling the
//! hook shares the one script tag.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_card_checkout::use_stripe_js;
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     let stripe_ready = use_stripe_js();
//!     html! {
//!         if stripe_ready {
//!             <p>{"Stripe.js loaded"}</p>
//!         } else {
//!             <p>{"Loading Stripe.js..."}</p>
//!         }
//!     }
//! }
//! ```

use gloo_utils::document;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::HtmlScriptElement;
use yew::functional::hook;
use yew::prelude::*;

const SCRIPT_ID: &str = "stripe-js-v3";
const SCRIPT_SRC: &str = "https://js.stripe.com/v3/";

/// Load Stripe.js v3 exactly once and track readiness.
///
/// Returns `false` while the script is being fetched and parsed, `true`
/// once `window.Stripe` exists.
#[hook]
pub fn use_stripe_js() -> bool {
    // A previous mount (or a server-rendered page) may already carry the
    // global; start out ready in that case.
    let loaded = use_state(|| {
        web_sys::window()
            .map(|win| Reflect::has(&win, &JsValue::from_str("Stripe")).unwrap_or(false))
            .unwrap_or(false)
    });

    {
        let loaded = loaded.clone();
        use_effect(move || {
            if !*loaded && document().get_element_by_id(SCRIPT_ID).is_none() {
                let script: HtmlScriptElement = document()
                    .create_element("script")
                    .expect("create script")
                    .dyn_into()
                    .expect("cast script");

                script.set_id(SCRIPT_ID);
                script.set_src(SCRIPT_SRC);
                script.set_defer(true);

                let onload = Closure::wrap(Box::new(move || {
                    loaded.set(true);
                }) as Box<dyn Fn()>);
                script.set_onload(Some(onload.as_ref().unchecked_ref()));
                // The closure must outlive this render to catch the load event.
                onload.forget();

                document()
                    .head()
                    .expect("head missing")
                    .append_child(&script)
                    .expect("append script");
            }
            || ()
        });
    }

    *loaded
}
