//! REST client wiring
//!
//! The base URL is baked in at build time and anchored to the page origin,
//! since `fetch` from wasm needs an absolute URL.

use std::rc::Rc;

use listapro_client::{ApiConfig, HttpTaskApi};

/// Client used by every controller in the app
pub type Api = HttpTaskApi;

pub fn api_config() -> ApiConfig {
    let config = ApiConfig::from_lookup(|key| match key {
        "LISTAPRO_API_URL" => option_env!("LISTAPRO_API_URL").map(str::to_string),
        "BACKEND_URL" => option_env!("BACKEND_URL").map(str::to_string),
        _ => None,
    });
    if !config.is_relative() {
        return config;
    }
    match web_sys::window().and_then(|window| window.location().origin().ok()) {
        Some(origin) => config.resolve_against(&origin),
        None => config,
    }
}

pub fn create_api() -> Rc<Api> {
    let config = api_config();
    tracing::info!(base_url = config.base_url(), "using REST backend");
    Rc::new(HttpTaskApi::new(config))
}
