use yew::prelude::*;
use web_sys::window;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use wheel_shared::constants::COUPON_COPIED_MESSAGE;
use wheel_shared::wheel::SpinResult;
use crate::styles;

// navigator.clipboard is looked up dynamically; older browsers lack it
async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let navigator = window().ok_or_else(|| JsValue::from_str("no window"))?.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await.map(|_| ())
}

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<SpinResult>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let copied = use_state(|| false);

    let Some(result) = &props.result else {
        return html! {};
    };

    let on_copy = {
        let copied = copied.clone();
        let coupon = result.coupon.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(coupon) = coupon.clone() else { return };
            let copied = copied.clone();
            spawn_local(async move {
                match copy_to_clipboard(&coupon).await {
                    Ok(()) => copied.set(true),
                    Err(e) => log::warn!("Could not copy coupon: {:?}", e),
                }
            });
        })
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class={classes!(
                "flex",
                "items-center",
                "justify-center",
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "from-orange-400",
                "to-pink-500",
                "border-orange-300",
                "text-white",
                "font-bold",
                "text-xl",
                "shadow-lg",
                "border-2",
                "animate-bounce"
            )}>
                <span>{format!("You won: {}", result.option.label)}</span>
            </div>
            {
                if let Some(coupon) = &result.coupon {
                    html! {
                        <div class="mt-4 flex items-center space-x-3">
                            <code class="text-lg font-mono bg-gray-100 dark:bg-gray-800 text-gray-900 dark:text-white px-4 py-2 rounded-lg">
                                {coupon}
                            </code>
                            <button class={styles::BUTTON_SECONDARY} onclick={on_copy}>
                                {"Copy"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            if *copied {
                <div class={classes!(styles::TEXT_SUCCESS, "mt-2")}>{COUPON_COPIED_MESSAGE}</div>
            }
        </div>
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub disabled: bool,
    #[prop_or_else(|| "Spin".to_string())]
    pub label: String,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning...".to_string()
    } else {
        props.label.clone()
    };

    let is_disabled = props.is_spinning || props.disabled;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    html! {
        <button
            class={classes!(
                "px-8",
                "py-3",
                "rounded-xl",
                "font-bold",
                "text-lg",
                "transition-all",
                "duration-300",
                button_class
            )}
            disabled={is_disabled}
            onclick={props.onclick.clone()}
        >
            {button_text}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusMessageProps {
    pub message: Option<String>,
    #[prop_or(false)]
    pub terminal: bool,
}

#[function_component(StatusMessage)]
pub fn status_message(props: &StatusMessageProps) -> Html {
    match &props.message {
        Some(message) => {
            let class = if props.terminal { styles::CARD } else { styles::CARD_ERROR };
            html! { <div class={classes!(class, "mt-4", "text-center")}>{message}</div> }
        }
        None => html! {},
    }
}
