use web_sys::window;
use wheel_shared::constants::{COLLECTION_ENDPOINT_PREFIX, DEFAULT_OUTCOME_TIMEOUT_MS, SPIN_ENDPOINT};

const USER_ID_KEY: &str = "wheel_user_id";

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            // Same origin as the page so the app works from any host the
            // backend is reachable on
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, host);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

pub fn get_asset_url(path: &str) -> String {
    if path.starts_with("http") || path.starts_with("data:") {
        path.to_string()
    } else {
        format!("{}{}", get_api_base_url(), path)
    }
}

pub fn spin_endpoint() -> String {
    format!("{}{}", get_api_base_url(), SPIN_ENDPOINT)
}

pub fn collection_endpoint(collection: &str) -> String {
    format!("{}{}{}", get_api_base_url(), COLLECTION_ENDPOINT_PREFIX, collection)
}

pub fn outcome_timeout_ms() -> u32 {
    DEFAULT_OUTCOME_TIMEOUT_MS
}

// Get auth token from storage
pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item("token").ok().flatten()))
}

/// Identifier sent with every spin. Stable for the browser session.
pub fn session_user_id() -> String {
    let storage = window().and_then(|w| w.session_storage().ok().flatten());
    if let Some(existing) = storage
        .as_ref()
        .and_then(|s| s.get_item(USER_ID_KEY).ok().flatten())
    {
        return existing;
    }

    let fresh = uuid::Uuid::new_v4().to_string();
    if let Some(storage) = storage {
        let _ = storage.set_item(USER_ID_KEY, &fresh);
    }
    fresh
}

/// Reads a query-string parameter from the current page URL.
pub fn query_param(name: &str) -> Option<String> {
    let search = window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}
