pub mod styles;
pub mod hooks;
pub mod pages;
pub mod config;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::{
   rewards_wheel::RewardsWheel,
   product_wheel::ProductWheel,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
   #[at("/")] RewardsWheel,
   #[at("/productos")] ProductWheel,
   #[not_found]
   #[at("/404")] NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::RewardsWheel => html! { <RewardsWheel /> },
        Route::ProductWheel => html! { <ProductWheel /> },
        Route::NotFound => html! {
            <div class={styles::CONTAINER}>
                <h1 class={classes!(styles::TEXT_H2, "text-center", "pt-24")}>{"Page not found"}</h1>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
