//! A drop-in Yew card checkout component.
//!
//! Handles loading Stripe.js, mounting the card element, surfacing the
//! widget's validation messages, and running the tokenize handshake on
//! submit, then emits typed success or error callbacks to your app.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::bindings::{CardElement, Stripe};
use crate::client::{
    create_token, mount_card_element, on_card_change, CardElementOptions, CardToken, StripeError,
    TokenizeResult,
};
use crate::components::{ErrorText, SubmitButton};
use crate::form::CARD_MOUNT_SELECTOR;
use crate::interop::use_stripe_js;

/// Properties for the [`CardCheckout`] component.
///
/// All fields except `publishable_key` are optional and default to no-ops
/// or sensible fallbacks.
///
/// # Fields
///
/// * `publishable_key` – Your Stripe publishable key (`pk_…`).
/// * `card_options` – Card element style/configuration override.
/// * `on_token` – Callback invoked with the minted [`CardToken`] on success.
/// * `on_error` – Callback invoked with [`StripeError`] on failure.
/// * `button_label` – Override the submit button text (default: `"Pay"`).
/// * `children` – Extra Yew nodes (e.g. order summary) rendered above the form.
#[derive(Properties, PartialEq, Clone)]
pub struct CardCheckoutProps {
    pub publishable_key: String,
    #[prop_or_default]
    pub card_options: Option<CardElementOptions>,
    #[prop_or_default]
    pub on_token: Callback<CardToken>,
    #[prop_or_default]
    pub on_error: Callback<StripeError>,
    #[prop_or_default]
    pub button_label: Option<String>,
    #[prop_or_default]
    pub children: Children,
}

/// Yew function component rendering a complete card checkout form.
///
/// This component will:
/// 1. Dynamically load `https://js.stripe.com/v3/` once per page.
/// 2. Instantiate Stripe and mount a card element into `#card-element`.
/// 3. Mirror the widget's change-event errors under the element, keeping a
///    non-breaking blank there otherwise.
/// 4. Handle submission: disable the button, call `stripe.createToken`,
///    then emit `on_token` or `on_error`.
///
/// On success the button stays disabled — your `on_token` handler is
/// expected to post the token and navigate. On failure the message is shown
/// inline and the button re-enables so the user can correct and resubmit.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_card_checkout::{CardCheckout, CardToken, StripeError};
///
/// #[function_component(App)]
/// fn app() -> Html {
///     let on_token = Callback::from(|token: CardToken| {
///         // post token.id to your charge endpoint, then navigate
///     });
///     let on_error = Callback::from(|err: StripeError| {
///         web_sys::console::warn_1(&err.message.into());
///     });
///
///     html! {
///         <CardCheckout
///             publishable_key="pk_test_123".to_string()
///             on_token={on_token}
///             on_error={on_error}
///             button_label={Some("Complete Purchase".into())}
///         >
///             <p>{ "Your order: Awesome T-shirt – $25.00" }</p>
///         </CardCheckout>
///     }
/// }
/// ```
#[function_component(CardCheckout)]
pub fn card_checkout(props: &CardCheckoutProps) -> Html {
    let stripe_ready = use_stripe_js();
    let handles = use_state(|| None::<(Stripe, CardElement)>);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    // Mount the card element once Stripe.js is up
    {
        let handles = handles.clone();
        let error = error.clone();
        let pk = props.publishable_key.clone();
        let card_opts = props.card_options.clone();
        use_effect_with(stripe_ready, move |ready| {
            if *ready {
                spawn_local(async move {
                    match mount_card_element(&pk, CARD_MOUNT_SELECTOR, card_opts).await {
                        Ok((stripe, _elements, card)) => {
                            {
                                let error = error.clone();
                                on_card_change(&card, move |event| {
                                    error.set(event.error.map(|e| e.message));
                                });
                            }
                            handles.set(Some((stripe, card)));
                        }
                        Err(e) => error.set(Some(e.message)),
                    }
                });
            }
            || ()
        });
    }

    let onsubmit = {
        let handles = handles.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_token = props.on_token.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }
            if let Some((stripe, card)) = &*handles {
                let stripe = stripe.clone();
                let card = card.clone();
                let error = error.clone();
                let submitting = submitting.clone();
                let on_token = on_token.clone();
                let on_error = on_error.clone();
                submitting.set(true);
                error.set(None);

                spawn_local(async move {
                    match create_token(&stripe, &card).await {
                        TokenizeResult::Token(token) => {
                            // Stay disabled: one token, one submission.
                            on_token.emit(token);
                        }
                        TokenizeResult::Error(err) => {
                            error.set(Some(err.message.clone()));
                            on_error.emit(err);
                            submitting.set(false);
                        }
                    }
                });
            }
        })
    };

    let ready = stripe_ready && handles.is_some();
    html! {
        <form {onsubmit} class="ycc-checkout-form">
            { for props.children.iter() }
            <div id="card-element" class="ycc-card-slot" />
            <ErrorText message={(*error).clone()} />
            <SubmitButton
                label={props.button_label.clone().unwrap_or_else(|| "Pay".to_string())}
                disabled={!ready || *submitting}
            />
        </form>
    }
}
