mod outcome_client;
mod wheel_canvas;
mod wheel_utils;

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlImageElement};
use std::rc::Rc;
use std::cell::RefCell;
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wheel_shared::constants::{ALREADY_USED_MESSAGE, MISSING_TICKET_MESSAGE, NO_OPTIONS_MESSAGE};
use wheel_shared::shared_wheel_game::CELEBRATION_INTERVAL_MS;
use wheel_shared::wheel::particles::trail_behind;
use wheel_shared::wheel::render::{render_celebration_frame, render_spin_frame};
use wheel_shared::wheel::{
    resolve_outcome, OptionSet, SpinResult, SpinState, WheelConfig, WheelOption, WheelSession,
};
use crate::config::{get_asset_url, session_user_id};
use crate::hooks::use_wheel_options;
use crate::styles;

use outcome_client::HttpOutcomeResolver;
use wheel_canvas::{CanvasSurface, WheelCanvas};
use wheel_utils::{ResultDisplay, SpinButton, StatusMessage};

const TRAIL_PARTICLES: usize = 3;

fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Everything the frame and tick callbacks need, shared by reference with
/// the component.
#[derive(Clone)]
struct WheelHandles {
    session: Rc<RefCell<WheelSession>>,
    canvas: NodeRef,
    center_image: Rc<RefCell<Option<HtmlImageElement>>>,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    ticker: Rc<RefCell<Option<Timeout>>>,
    refresh: UseForceUpdateHandle,
    on_result: Callback<SpinResult>,
}

impl WheelHandles {
    fn surface(&self) -> Option<CanvasSurface> {
        CanvasSurface::from_node(&self.canvas, self.center_image.borrow().clone())
    }

    fn stop_animations(&self) {
        self.frame.borrow_mut().take();
        self.ticker.borrow_mut().take();
    }

    /// Draws the wheel standing still at its current angle.
    fn draw_rest(&self) {
        let Some(mut surface) = self.surface() else { return };
        let session = self.session.borrow();
        render_spin_frame(&mut surface, session.options(), session.config(), session.angle(), 0.0, &[]);
    }

    fn schedule_frame(&self) {
        let handles = self.clone();
        let frame = request_animation_frame(move |_| run_frame(handles));
        *self.frame.borrow_mut() = Some(frame);
    }

    fn schedule_celebration_tick(&self) {
        let handles = self.clone();
        let tick = Timeout::new(CELEBRATION_INTERVAL_MS, move || run_celebration_tick(handles));
        *self.ticker.borrow_mut() = Some(tick);
    }

    fn reveal(&self) {
        self.draw_rest();
        let result = self.session.borrow().result().cloned();
        if let Some(result) = result {
            self.on_result.emit(result);
        }
        self.refresh.force_update();
    }
}

fn run_frame(handles: WheelHandles) {
    let Some(mut surface) = handles.surface() else {
        // Canvas went away mid-spin; nothing left to animate on
        handles.session.borrow_mut().cancel();
        handles.refresh.force_update();
        return;
    };

    let mut rng = rand::thread_rng();
    let (frame, state) = {
        let mut session = handles.session.borrow_mut();
        let Some(frame) = session.advance(now(), &mut rng) else { return };
        let trail = if frame.emit_trail {
            trail_behind(&mut rng, session.config().pointer_angle, TRAIL_PARTICLES)
        } else {
            Vec::new()
        };
        render_spin_frame(&mut surface, session.options(), session.config(), frame.angle, frame.tilt, &trail);
        (frame, session.state())
    };

    if !frame.finished {
        handles.schedule_frame();
        return;
    }

    handles.frame.borrow_mut().take();
    match state {
        SpinState::Celebrating => {
            handles.refresh.force_update();
            handles.schedule_celebration_tick();
        }
        _ => handles.reveal(),
    }
}

fn run_celebration_tick(handles: WheelHandles) {
    let mut rng = rand::thread_rng();
    let frame = {
        let mut session = handles.session.borrow_mut();
        let Some(frame) = session.celebrate(&mut rng) else { return };
        if let Some(mut surface) = handles.surface() {
            render_celebration_frame(&mut surface, session.options(), session.config(), session.angle(), &frame);
        }
        frame
    };

    if frame.finished {
        handles.ticker.borrow_mut().take();
        handles.reveal();
    } else {
        handles.schedule_celebration_tick();
    }
}

#[derive(Properties, PartialEq)]
pub struct PrizeWheelProps {
    /// Sectors supplied by the caller; these win over `collection`.
    #[prop_or_default]
    pub options: Option<Vec<WheelOption>>,
    /// Content collection to load sectors from.
    #[prop_or_default]
    pub collection: Option<String>,
    #[prop_or_default]
    pub config: WheelConfig,
    #[prop_or_default]
    pub center_image: Option<String>,
    #[prop_or_default]
    pub ticket: Option<String>,
    #[prop_or_default]
    pub user_id: Option<String>,
    #[prop_or_default]
    pub on_result: Callback<SpinResult>,
}

#[function_component(PrizeWheel)]
pub fn prize_wheel(props: &PrizeWheelProps) -> Html {
    let refresh = use_force_update();
    let error_message = use_state(|| None::<String>);
    let wheel_options = use_wheel_options(props.options.clone(), props.collection.clone());

    let session = {
        let config = props.config.clone();
        use_mut_ref(move || WheelSession::new(OptionSet::default(), config))
    };
    let center_image = use_mut_ref(|| None::<HtmlImageElement>);
    let frame = use_mut_ref(|| None::<AnimationFrame>);
    let ticker = use_mut_ref(|| None::<Timeout>);
    let canvas_ref = use_node_ref();

    let handles = WheelHandles {
        session,
        canvas: canvas_ref.clone(),
        center_image,
        frame,
        ticker,
        refresh,
        on_result: props.on_result.clone(),
    };

    // Swap in sectors as they arrive; mid-spin they wait for the reveal
    {
        let handles = handles.clone();
        use_effect_with(wheel_options.options.clone(), move |options| {
            let applied = handles.session.borrow_mut().set_options(options.clone());
            if applied {
                handles.draw_rest();
                handles.refresh.force_update();
            } else {
                log::debug!("Sector update deferred until the wheel stops");
            }
            || ()
        });
    }

    // Load the medallion image; the wheel redraws once it is decoded
    {
        let handles = handles.clone();
        use_effect_with(props.center_image.clone(), move |src| {
            let listener = src.as_ref().and_then(|src| {
                let image = HtmlImageElement::new().ok()?;
                let loaded = image.clone();
                let handles = handles.clone();
                let listener = EventListener::once(&image, "load", move |_| {
                    *handles.center_image.borrow_mut() = Some(loaded);
                    let idle = !matches!(
                        handles.session.borrow().state(),
                        SpinState::Spinning | SpinState::Celebrating
                    );
                    if idle {
                        handles.draw_rest();
                    }
                });
                image.set_src(&get_asset_url(src));
                Some(listener)
            });
            move || drop(listener)
        });
    }

    // Stop every pending frame and tick on unmount
    {
        let handles = handles.clone();
        use_effect_with((), move |_| {
            move || {
                handles.stop_animations();
                handles.session.borrow_mut().cancel();
            }
        });
    }

    let start_spin = {
        let handles = handles.clone();
        let error_message = error_message.clone();
        let ticket = props.ticket.clone();
        let user_id = props.user_id.clone();
        // Explicit sectors are not a server catalogue
        let collection = if props.options.is_some() { None } else { props.collection.clone() };

        Callback::from(move |_: MouseEvent| {
            let Some(ticket) = ticket.clone() else {
                error_message.set(Some(MISSING_TICKET_MESSAGE.to_string()));
                return;
            };
            let user_id = user_id.clone().unwrap_or_else(session_user_id);

            let request = match handles.session.borrow_mut().begin_spin(&user_id, &ticket) {
                Ok(request) => request.with_collection(collection.clone()),
                Err(reason) => {
                    log::debug!("Spin ignored: {}", reason);
                    return;
                }
            };
            handles.stop_animations();
            error_message.set(None);
            handles.refresh.force_update();

            let option_count = handles.session.borrow().options().len();
            let handles = handles.clone();
            let error_message = error_message.clone();
            spawn_local(async move {
                let resolver = HttpOutcomeResolver::from_config();
                let outcome = resolve_outcome(&resolver, &request, option_count).await;
                let applied = handles.session.borrow_mut().apply_outcome(outcome, now());
                match applied {
                    Ok(plan) => {
                        log::info!("Spinning to sector {} of {}", plan.winning_index, plan.option_count);
                        handles.schedule_frame();
                    }
                    Err(err) => {
                        error_message.set(Some(err.user_message().to_string()));
                        handles.draw_rest();
                    }
                }
                handles.refresh.force_update();
            });
        })
    };

    let (state, can_spin, result, has_options) = {
        let session = handles.session.borrow();
        (
            session.state(),
            session.can_spin(),
            session.result().cloned(),
            !session.options().is_empty(),
        )
    };
    let is_spinning = matches!(state, SpinState::Spinning | SpinState::Celebrating);

    let status = if state == SpinState::Exhausted {
        Some(ALREADY_USED_MESSAGE.to_string())
    } else if wheel_options.error.is_some() || (!wheel_options.loading && !has_options) {
        Some(NO_OPTIONS_MESSAGE.to_string())
    } else if props.ticket.is_none() {
        Some(MISSING_TICKET_MESSAGE.to_string())
    } else {
        (*error_message).clone()
    };

    html! {
        <div class="flex flex-col items-center">
            <div class="relative">
                <WheelCanvas canvas_ref={canvas_ref} />
                if wheel_options.loading {
                    <div class="absolute inset-0 flex items-center justify-center">
                        <span class={styles::LOADING_SPINNER}></span>
                    </div>
                }
            </div>
            <div class="mt-6">
                <SpinButton
                    is_spinning={is_spinning}
                    disabled={!can_spin || props.ticket.is_none()}
                    onclick={start_spin}
                />
            </div>
            <StatusMessage message={status} terminal={state == SpinState::Exhausted} />
            <ResultDisplay result={if state == SpinState::Resolved { result } else { None }} />
        </div>
    }
}
