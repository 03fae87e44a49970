//! Build-time configuration for the session endpoint and routing, with an
//! optional runtime override. The runtime config is read from
//! `window.NAVGATE_CONFIG` (if present) so static deployments can change
//! endpoints without rebuilding. Configuration values are public.

use navgate::NavigatorConfig;

/// Endpoint used when `NAVGATE_SESSION_URL` is not set at build time.
const DEFAULT_SESSION_URL: &str = "/api/session";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub session_url: String,
    pub base_path: String,
    pub sign_in_path: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let defaults = NavigatorConfig::default();
        let mut config = Self {
            session_url: option_env!("NAVGATE_SESSION_URL")
                .unwrap_or(DEFAULT_SESSION_URL)
                .to_string(),
            base_path: option_env!("NAVGATE_BASE_PATH").map_or(defaults.base_path, str::to_string),
            sign_in_path: option_env!("NAVGATE_SIGN_IN_PATH")
                .map_or(defaults.sign_in_path, str::to_string),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Routing half of the configuration.
    pub fn navigator(&self) -> NavigatorConfig {
        NavigatorConfig {
            base_path: self.base_path.clone(),
            sign_in_path: self.sign_in_path.clone(),
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    session_url: Option<String>,
    base_path: Option<String>,
    sign_in_path: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.session_url {
        config.session_url = value;
    }
    if let Some(value) = runtime.base_path {
        config.base_path = value;
    }
    if let Some(value) = runtime.sign_in_path {
        config.sign_in_path = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("NAVGATE_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        session_url: read_runtime_value(&object, "session_url"),
        base_path: read_runtime_value(&object, "base_path"),
        sign_in_path: read_runtime_value(&object, "sign_in_path"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
