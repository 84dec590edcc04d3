use yew::prelude::*;

/// The checkout form's submit control.
#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    /// Button label text
    pub label: String,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button
            type="submit"
            disabled={props.disabled}
            class="ycc-submit-button" // style via an external stylesheet
        >
            { &props.label }
        </button>
    }
}

/// The error-display region under the card element.
///
/// Renders a non-breaking space while no message is pending so the region
/// keeps its height.
#[derive(Properties, PartialEq)]
pub struct ErrorTextProps {
    /// Current error message, if any
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(ErrorText)]
pub fn error_text(props: &ErrorTextProps) -> Html {
    let text = props.message.clone().unwrap_or_else(|| "\u{a0}".to_string());
    html! {
        <div id="card-errors" class="ycc-error-text">{ text }</div>
    }
}
