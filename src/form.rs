//! Framework-free checkout form controller.
//!
//! Binds the card element into an existing payment form and runs the
//! submit-time handshake: intercept the submit event, disable the button,
//! tokenize, then either surface the error or append the token as a hidden
//! field and re-submit the form for real.
//!
//! The hosting application calls [`init_card_form`] once during startup with
//! the page's `Document`. Pages without a payment form are a silent no-op.
//!
//! # Example Usage
//! ```rust,ignore
//! use gloo_utils::document;
//! use yew_card_checkout::init_card_form;
//!
//! wasm_bindgen_futures::spawn_local(async {
//!     let _form = init_card_form(&document()).await;
//! });
//! ```

use std::future::Future;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use crate::bindings::{CardElement, Stripe};
use crate::client::{
    create_token, js_to_stripe_error, mount_card_element, on_card_change, StripeError,
    TokenizeResult,
};

/// Attribute marking the payment form and carrying the publishable key.
pub const KEY_ATTRIBUTE: &str = "data-publishable-key";
/// Selector of the slot the card element mounts into.
pub const CARD_MOUNT_SELECTOR: &str = "#card-element";
/// Id of the element receiving widget and tokenization error text.
pub const CARD_ERRORS_ID: &str = "card-errors";
/// Name of the hidden field carrying the token on the real submission.
pub const TOKEN_FIELD_NAME: &str = "token";
/// Non-breaking space shown while no error is pending, so the error region
/// never visually collapses.
pub const BLANK_PLACEHOLDER: &str = "\u{a0}";

/// Capability of exchanging the captured card data for a one-time token.
///
/// The production implementation is [`StripeTokenizer`]; tests substitute a
/// double resolving to a canned [`TokenizeResult`].
pub trait TokenizeCard {
    fn tokenize(&self) -> impl Future<Output = TokenizeResult>;
}

/// Tokenizer backed by a live Stripe handle and its mounted card element.
#[derive(Clone, Debug)]
pub struct StripeTokenizer {
    stripe: Stripe,
    card: CardElement,
}

impl StripeTokenizer {
    pub fn new(stripe: Stripe, card: CardElement) -> Self {
        Self { stripe, card }
    }
}

impl TokenizeCard for StripeTokenizer {
    async fn tokenize(&self) -> TokenizeResult {
        create_token(&self.stripe, &self.card).await
    }
}

/// A fully wired payment form: card element mounted, change and submit
/// listeners attached. Lives for the rest of the page.
pub struct CardForm {
    /// The intercepted payment form.
    pub form: HtmlFormElement,
    /// The mounted card element, e.g. for tearing down on a route change.
    pub card: CardElement,
}

/// Locate the payment form and wire the full card checkout behavior.
///
/// Returns `None` when the page has no `form[data-publishable-key]` (nothing
/// is constructed, no listeners attach) and also when wiring fails — a page
/// whose checkout cannot come up stays usable, with a console warning as the
/// only trace.
pub async fn init_card_form(document: &Document) -> Option<CardForm> {
    let (form, publishable_key) = find_payment_form(document)?;

    match wire_card_form(document, form, &publishable_key).await {
        Ok(card_form) => Some(card_form),
        Err(err) => {
            console::warn_1(&format!("card checkout setup failed: {}", err.message).into());
            None
        }
    }
}

/// Find `form[data-publishable-key]` and extract its key.
pub fn find_payment_form(document: &Document) -> Option<(HtmlFormElement, String)> {
    let element = document
        .query_selector(&format!("form[{}]", KEY_ATTRIBUTE))
        .ok()
        .flatten()?;
    let publishable_key = element.get_attribute(KEY_ATTRIBUTE)?;
    let form = element.dyn_into::<HtmlFormElement>().ok()?;
    Some((form, publishable_key))
}

async fn wire_card_form(
    document: &Document,
    form: HtmlFormElement,
    publishable_key: &str,
) -> Result<CardForm, StripeError> {
    let errors = document
        .get_element_by_id(CARD_ERRORS_ID)
        .ok_or_else(|| missing(CARD_ERRORS_ID))?;
    let button = form
        .query_selector(r#"button[type="submit"]"#)
        .map_err(js_to_stripe_error)?
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        .ok_or_else(|| missing("a submit button"))?;

    let (stripe, _elements, card) =
        mount_card_element(publishable_key, CARD_MOUNT_SELECTOR, None).await?;

    errors.set_text_content(Some(BLANK_PLACEHOLDER));
    {
        let errors = errors.clone();
        on_card_change(&card, move |event| {
            display_card_status(&errors, event.error.as_ref());
        });
    }

    let tokenizer = StripeTokenizer::new(stripe, card.clone());
    attach_submit_handler(&form, &button, &errors, tokenizer)?;

    Ok(CardForm { form, card })
}

/// Write the widget-reported error into the error region, or the blank
/// placeholder when the entry is clean.
pub fn display_card_status(errors: &Element, error: Option<&StripeError>) {
    let text = error.map(|e| e.message.as_str()).unwrap_or(BLANK_PLACEHOLDER);
    errors.set_text_content(Some(text));
}

/// Wire the submit interception onto the form: suppress the default
/// submission, lock the button, then run [`tokenize_and_submit`] with the
/// given tokenizer.
///
/// [`init_card_form`] attaches a [`StripeTokenizer`] here; the generic
/// parameter lets a double stand in for the exchange.
pub fn attach_submit_handler<T>(
    form: &HtmlFormElement,
    button: &HtmlButtonElement,
    errors: &Element,
    tokenizer: T,
) -> Result<(), StripeError>
where
    T: TokenizeCard + Clone + 'static,
{
    let form_handle = form.clone();
    let button_handle = button.clone();
    let errors_handle = errors.clone();

    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.prevent_default();
        // Disable before the async call starts: the disabled button is the
        // sole guard against a second concurrent tokenization.
        button_handle.set_disabled(true);

        let form = form_handle.clone();
        let button = button_handle.clone();
        let errors = errors_handle.clone();
        let tokenizer = tokenizer.clone();
        spawn_local(async move {
            tokenize_and_submit(&form, &button, &errors, &tokenizer).await;
        });
    }) as Box<dyn FnMut(web_sys::Event)>);

    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        .map_err(js_to_stripe_error)?;
    closure.forget();
    Ok(())
}

/// Run one tokenization exchange and act on its outcome.
///
/// Error: message into the error region, button re-enabled, nothing else.
/// Token: hidden `token` field appended and the form submitted for real,
/// navigating the page — the button stays disabled.
pub async fn tokenize_and_submit<T: TokenizeCard>(
    form: &HtmlFormElement,
    button: &HtmlButtonElement,
    errors: &Element,
    tokenizer: &T,
) {
    let result = tokenizer.tokenize().await;
    match apply_tokenize_result(form, button, errors, result) {
        Ok(true) => {
            if let Err(js_err) = form.submit() {
                fail_attempt(button, errors, js_to_stripe_error(js_err));
            }
        }
        Ok(false) => {}
        Err(js_err) => fail_attempt(button, errors, js_to_stripe_error(js_err)),
    }
}

/// Apply a tokenization outcome to the form, returning whether the real
/// submission should follow.
///
/// Split out from [`tokenize_and_submit`] so the branch can be exercised
/// without navigating the page.
pub fn apply_tokenize_result(
    form: &HtmlFormElement,
    button: &HtmlButtonElement,
    errors: &Element,
    result: TokenizeResult,
) -> Result<bool, JsValue> {
    match result {
        TokenizeResult::Error(err) => {
            errors.set_text_content(Some(&err.message));
            button.set_disabled(false);
            Ok(false)
        }
        TokenizeResult::Token(token) => {
            append_token_field(form, &token.id)?;
            Ok(true)
        }
    }
}

fn append_token_field(form: &HtmlFormElement, token_id: &str) -> Result<(), JsValue> {
    let document = form
        .owner_document()
        .ok_or_else(|| JsValue::from_str("payment form is detached from any document"))?;
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("hidden");
    input.set_name(TOKEN_FIELD_NAME);
    input.set_value(token_id);
    form.append_child(&input)?;
    Ok(())
}

fn fail_attempt(button: &HtmlButtonElement, errors: &Element, err: StripeError) {
    errors.set_text_content(Some(&err.message));
    button.set_disabled(false);
}

fn missing(what: &str) -> StripeError {
    StripeError {
        message: format!("payment form is missing {}", what),
        error_type: None,
        code: None,
    }
}
