use yew::prelude::*;
use wheel_shared::constants::PROVISIONAL_PRODUCTS_COLLECTION;
use wheel_shared::wheel::WheelConfig;
use crate::config::query_param;
use crate::pages::wheel::PrizeWheel;
use crate::styles;

/// Product giveaway wheel with the pointer on the right.
#[function_component(ProductWheel)]
pub fn product_wheel() -> Html {
    let ticket = use_memo((), |_| query_param("ticket"));

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::CONTAINER_SM}>
                <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-6")}>{"Product giveaway"}</h1>
                <PrizeWheel
                    collection={Some(PROVISIONAL_PRODUCTS_COLLECTION.to_string())}
                    config={WheelConfig::right_pointer()}
                    ticket={(*ticket).clone()}
                />
            </div>
        </div>
    }
}
