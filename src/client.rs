//! High-level Rust API for the Stripe.js card element and token flow.
//!
//! This module provides:
//! - `CardElementOptions` / `CardStyle` to configure the card element at
//!   creation time (colors, font, placeholder, invalid state, postal code).
//! - `StripeError`, `CardToken`, and `TokenizeResult` as the typed shapes of
//!   everything Stripe.js hands back.
//! - `mount_card_element()` to initialize Stripe, create Elements, and mount
//!   the card element into a DOM slot.
//! - `on_card_change()` to subscribe to the element's change events with a
//!   typed payload.
//! - `create_token()` to run one tokenization exchange.
//! - `unmount_card_element()` to tear a mounted element down.
//!
//! # Example Usage
//! ```rust,ignore
//! let (stripe, _elements, card) =
//!     mount_card_element("pk_test_123", "#card-element", None).await?;
//!
//! on_card_change(&card, |event| {
//!     // event.error carries the widget's own validation message, if any
//! });
//!
//! match create_token(&stripe, &card).await {
//!     TokenizeResult::Token(token) => log_token(&token.id),
//!     TokenizeResult::Error(err) => show_error(&err.message),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::bindings::{new_stripe, CardElement, Elements, Stripe};

/// Options for `elements.create("card", ...)`.
///
/// `Default` reproduces the stock checkout appearance: dark slate text,
/// Helvetica stack, muted placeholder, red invalid state, postal code
/// sub-field suppressed.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CardElementOptions {
    /// Visual style specification for the element's states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CardStyle>,

    /// Suppress the postal-code sub-field.
    #[serde(rename = "hidePostalCode", skip_serializing_if = "Option::is_none")]
    pub hide_postal_code: Option<bool>,

    /// Any other JSON-serializable settings (e.g. `classes`, `iconStyle`).
    #[serde(flatten)]
    pub extra: Option<serde_json::Value>,
}

impl Default for CardElementOptions {
    fn default() -> Self {
        Self {
            style: Some(CardStyle::default()),
            hide_postal_code: Some(true),
            extra: None,
        }
    }
}

/// Style specification passed to the card element, keyed by element state.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CardStyle {
    pub base: BaseStyle,
    pub invalid: InvalidStyle,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            base: BaseStyle {
                color: "#32325d".into(),
                line_height: "24px".into(),
                font_family: "\"Helvetica Neue\", Helvetica, sans-serif".into(),
                font_smoothing: "antialiased".into(),
                font_size: "16px".into(),
                placeholder: PlaceholderStyle {
                    color: "#aab7c4".into(),
                },
            },
            invalid: InvalidStyle {
                color: "#fa755a".into(),
                icon_color: "#fa755a".into(),
            },
        }
    }
}

/// Styling of the element's resting state.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BaseStyle {
    pub color: String,
    #[serde(rename = "lineHeight")]
    pub line_height: String,
    #[serde(rename = "fontFamily")]
    pub font_family: String,
    #[serde(rename = "fontSmoothing")]
    pub font_smoothing: String,
    #[serde(rename = "fontSize")]
    pub font_size: String,
    #[serde(rename = "::placeholder")]
    pub placeholder: PlaceholderStyle,
}

/// Styling of the placeholder pseudo-element.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlaceholderStyle {
    pub color: String,
}

/// Styling applied while the element's contents fail validation.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InvalidStyle {
    pub color: String,
    #[serde(rename = "iconColor")]
    pub icon_color: String,
}

/// Representation of a Stripe.js error object.
#[derive(Clone, Debug, Deserialize)]
pub struct StripeError {
    /// Human-readable, display-ready message.
    pub message: String,
    /// Stripe's error type, e.g. `"card_error"`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Optional Stripe error code, e.g. `"incomplete_number"`.
    #[serde(default)]
    pub code: Option<String>,
}

/// A single-use card token minted by the provider.
#[derive(Clone, Debug, Deserialize)]
pub struct CardToken {
    /// Opaque token identifier, e.g. `tok_1Fxxxxxx`.
    pub id: String,
}

/// Strongly-typed outcome of one tokenization exchange.
#[derive(Clone, Debug)]
pub enum TokenizeResult {
    /// Tokenization succeeded; carries the opaque token.
    Token(CardToken),
    /// Tokenization failed; carries Stripe's error details.
    Error(StripeError),
}

/// Payload of the card element's `change` event.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CardChangeEvent {
    /// Validation error reported by the widget, if any.
    #[serde(default)]
    pub error: Option<StripeError>,
    /// Whether the element holds a complete, well-formed card entry.
    #[serde(default)]
    pub complete: bool,
    /// Whether the element is empty.
    #[serde(default)]
    pub empty: bool,
}

/// Resolution shape of `stripe.createToken`: exactly one of the two keys set.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTokenResult {
    #[serde(default)]
    pub token: Option<CardToken>,
    #[serde(default)]
    pub error: Option<StripeError>,
}

/// Initialize Stripe.js, create an Elements instance, and mount a card element.
///
/// # Arguments
///
/// * `publishable_key` – Your Stripe publishable key (starts with `pk_`).
/// * `mount_id` – CSS selector for the slot, e.g. `"#card-element"`.
/// * `options` – Card element style/configuration; `None` uses the defaults.
///
/// # Returns
///
/// On success, returns `(Stripe, Elements, CardElement)`. On failure,
/// returns a `StripeError`.
pub async fn mount_card_element(
    publishable_key: &str,
    mount_id: &str,
    options: Option<CardElementOptions>,
) -> Result<(Stripe, Elements, CardElement), StripeError> {
    let stripe = new_stripe(publishable_key);

    let elements = stripe
        .elements(JsValue::undefined())
        .map_err(js_to_stripe_error)?;

    let opts_js = to_value(&options.unwrap_or_default()).map_err(serde_error_to_stripe_error)?;
    let card = elements
        .create_element("card", opts_js)
        .map_err(js_to_stripe_error)?;

    card.mount(mount_id).map_err(js_to_stripe_error)?;

    Ok((stripe, elements, card))
}

/// Subscribe to the card element's `change` events with a typed payload.
///
/// The handler lives for the rest of the page; the underlying closure is
/// leaked, matching the element's own page-long lifetime.
pub fn on_card_change<F>(card: &CardElement, mut handler: F)
where
    F: FnMut(CardChangeEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: JsValue| {
        let change = from_value::<CardChangeEvent>(event).unwrap_or_default();
        handler(change);
    }) as Box<dyn FnMut(JsValue)>);

    card.on("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Exchange the card element's contents for a single-use token.
///
/// Single attempt: no retry and no local timeout. Stripe resolves the
/// promise with `{token}` or `{error}`; promise rejections (network loss,
/// provider exceptions) are folded into `TokenizeResult::Error` too.
pub async fn create_token(stripe: &Stripe, card: &CardElement) -> TokenizeResult {
    let promise = match stripe.create_token(card) {
        Ok(p) => p,
        Err(e) => return TokenizeResult::Error(js_to_stripe_error(e)),
    };

    match JsFuture::from(promise).await {
        Ok(js_val) => match from_value::<RawTokenResult>(js_val) {
            Ok(raw) => classify_token_result(raw),
            Err(e) => TokenizeResult::Error(serde_error_to_stripe_error(e)),
        },
        Err(js_err) => TokenizeResult::Error(js_to_stripe_error(js_err)),
    }
}

/// Tear down a mounted card element so its slot can be re-used.
pub fn unmount_card_element(card: &CardElement) -> Result<(), StripeError> {
    card.unmount().map_err(js_to_stripe_error)
}

/// Collapse the raw `{token} | {error}` resolution into `TokenizeResult`.
pub(crate) fn classify_token_result(raw: RawTokenResult) -> TokenizeResult {
    match (raw.token, raw.error) {
        (_, Some(err)) => TokenizeResult::Error(err),
        (Some(token), None) => TokenizeResult::Token(token),
        (None, None) => TokenizeResult::Error(StripeError {
            message: "Tokenization returned neither a token nor an error.".into(),
            error_type: None,
            code: None,
        }),
    }
}

/// Convert any caught `JsValue` into a `StripeError` with best effort.
pub(crate) fn js_to_stripe_error(value: JsValue) -> StripeError {
    from_value::<StripeError>(value.clone()).unwrap_or_else(|_| StripeError {
        message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        error_type: None,
        code: None,
    })
}

/// Convert a `serde_wasm_bindgen::Error` into `StripeError`.
fn serde_error_to_stripe_error(err: serde_wasm_bindgen::Error) -> StripeError {
    StripeError {
        message: err.to_string(),
        error_type: None,
        code: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_stock_appearance() {
        let opts = serde_json::to_value(CardElementOptions::default()).unwrap();

        assert_eq!(opts["hidePostalCode"], true);
        assert_eq!(opts["style"]["base"]["color"], "#32325d");
        assert_eq!(opts["style"]["base"]["lineHeight"], "24px");
        assert_eq!(opts["style"]["base"]["fontSize"], "16px");
        assert_eq!(opts["style"]["base"]["::placeholder"]["color"], "#aab7c4");
        assert_eq!(opts["style"]["invalid"]["color"], "#fa755a");
        assert_eq!(opts["style"]["invalid"]["iconColor"], "#fa755a");
    }

    #[test]
    fn bare_options_serialize_without_null_keys() {
        let opts = CardElementOptions {
            style: None,
            hide_postal_code: None,
            extra: None,
        };
        let json = serde_json::to_value(opts).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn token_resolution_classifies_as_token() {
        let raw: RawTokenResult =
            serde_json::from_str(r#"{"token": {"id": "tok_abc"}}"#).unwrap();
        match classify_token_result(raw) {
            TokenizeResult::Token(token) => assert_eq!(token.id, "tok_abc"),
            other => panic!("expected token, got {:?}", other),
        }
    }

    #[test]
    fn error_resolution_classifies_as_error() {
        let raw: RawTokenResult = serde_json::from_str(
            r#"{"error": {"message": "Your card number is incomplete.", "type": "validation_error", "code": "incomplete_number"}}"#,
        )
        .unwrap();
        match classify_token_result(raw) {
            TokenizeResult::Error(err) => {
                assert_eq!(err.message, "Your card number is incomplete.");
                assert_eq!(err.error_type.as_deref(), Some("validation_error"));
                assert_eq!(err.code.as_deref(), Some("incomplete_number"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn empty_resolution_becomes_error() {
        let raw: RawTokenResult = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            classify_token_result(raw),
            TokenizeResult::Error(_)
        ));
    }

    #[test]
    fn change_event_without_error_deserializes() {
        let event: CardChangeEvent =
            serde_json::from_str(r#"{"complete": false, "empty": true}"#).unwrap();
        assert!(event.error.is_none());
        assert!(!event.complete);
        assert!(event.empty);
    }

    #[test]
    fn change_event_carries_widget_error() {
        let event: CardChangeEvent = serde_json::from_str(
            r#"{"complete": false, "empty": false, "error": {"message": "Invalid card number."}}"#,
        )
        .unwrap();
        assert_eq!(event.error.unwrap().message, "Invalid card number.");
    }
}
