use yew::prelude::*;
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::wheel::option::{options_from_collection_str, DEFAULT_LABEL_FIELDS};
use wheel_shared::wheel::{resolve_options, OptionSet, WheelOption};
use crate::config::collection_endpoint;

#[derive(Clone, PartialEq, Default)]
pub struct WheelOptions {
    pub loading: bool,
    pub options: OptionSet,
    pub error: Option<String>,
}

async fn fetch_collection(collection: &str) -> Result<Vec<WheelOption>, String> {
    let response = Request::get(&collection_endpoint(collection))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Error status: {}", response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Error reading collection: {}", e))?;
    options_from_collection_str(&body, DEFAULT_LABEL_FIELDS).map_err(|e| e.to_string())
}

/// Sectors for a wheel. Caller-supplied options are used as is; otherwise
/// the named collection is fetched once per collection name.
#[hook]
pub fn use_wheel_options(
    explicit: Option<Vec<WheelOption>>,
    collection: Option<String>,
) -> WheelOptions {
    let has_explicit = explicit.as_ref().map_or(false, |options| !options.is_empty());
    let state = use_state(|| WheelOptions {
        loading: !has_explicit && collection.is_some(),
        options: resolve_options(explicit.clone(), None),
        error: None,
    });

    {
        let state = state.clone();

        use_effect_with((explicit, collection), move |(explicit, collection)| {
            let explicit = explicit.clone();
            match collection.clone() {
                Some(collection) if !has_explicit => {
                    state.set(WheelOptions { loading: true, ..WheelOptions::default() });

                    spawn_local(async move {
                        match fetch_collection(&collection).await {
                            Ok(fetched) => {
                                log::info!("Loaded {} wheel options from '{}'", fetched.len(), collection);
                                state.set(WheelOptions {
                                    loading: false,
                                    options: resolve_options(explicit, Some(fetched)),
                                    error: None,
                                });
                            }
                            Err(err) => {
                                log::error!("Failed to load wheel options from '{}': {}", collection, err);
                                state.set(WheelOptions {
                                    loading: false,
                                    options: OptionSet::default(),
                                    error: Some(err),
                                });
                            }
                        }
                    });
                }
                _ => state.set(WheelOptions {
                    loading: false,
                    options: resolve_options(explicit, None),
                    error: None,
                }),
            }

            || ()
        });
    }

    (*state).clone()
}
