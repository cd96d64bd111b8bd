use yew::prelude::*;
use wheel_shared::constants::REWARDS_COLLECTION;
use wheel_shared::wheel::{SpinResult, WheelConfig};
use crate::config::query_param;
use crate::pages::wheel::PrizeWheel;
use crate::styles;

/// Single-use ticket wheel: pointer at the bottom, prizes from the
/// rewards collection, one spin per ticket.
#[function_component(RewardsWheel)]
pub fn rewards_wheel() -> Html {
    let ticket = use_memo((), |_| query_param("ticket"));
    let user_id = use_memo((), |_| query_param("usuario"));

    let on_result = Callback::from(|result: SpinResult| {
        log::info!("Ticket redeemed for '{}'", result.option.label);
    });

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::CONTAINER_SM}>
                <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-6")}>{"Spin to win"}</h1>
                <PrizeWheel
                    collection={Some(REWARDS_COLLECTION.to_string())}
                    config={WheelConfig::bottom_pointer()}
                    center_image={Some("/assets/logo.png".to_string())}
                    ticket={(*ticket).clone()}
                    user_id={(*user_id).clone()}
                    on_result={on_result}
                />
            </div>
        </div>
    }
}
