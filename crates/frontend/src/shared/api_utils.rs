//! Конфигурация клиента и построение URL backend.
//!
//! The configuration is read once at start-up from `/televendas.toml`; when the
//! file is absent or invalid the built-in defaults apply.

use contracts::shared::config::ClientConfig;
use gloo_net::http::Request;
use leptos::prelude::*;

const CONFIG_PATH: &str = "/televendas.toml";

/// Reactive holder of the runtime configuration, provided at the app root.
#[derive(Clone, Copy)]
pub struct ConfigContext(RwSignal<ClientConfig>);

impl ConfigContext {
    pub fn new() -> Self {
        Self(RwSignal::new(ClientConfig::default()))
    }

    pub fn set(&self, config: ClientConfig) {
        self.0.set(config);
    }

    pub fn get_untracked(&self) -> ClientConfig {
        self.0.get_untracked()
    }
}

impl Default for ConfigContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches `/televendas.toml`, falling back to the built-in defaults.
pub async fn load_config() -> ClientConfig {
    let Some(text) = fetch_config_text().await else {
        log::debug!("{} not served, using built-in configuration", CONFIG_PATH);
        return ClientConfig::default();
    };
    match ClientConfig::from_toml_str(&text) {
        Ok(config) => {
            log::info!("configuration loaded from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            log::warn!("invalid {}: {:#}", CONFIG_PATH, e);
            ClientConfig::default()
        }
    }
}

async fn fetch_config_text() -> Option<String> {
    let response = Request::get(CONFIG_PATH).send().await.ok()?;
    if !response.ok() {
        return None;
    }
    response.text().await.ok()
}

/// Get the base URL for API requests
///
/// An explicit `api.base_url` wins; otherwise the page host is used with
/// `api.port`, e.g. "http://localhost:3000".
pub fn api_base(config: &ClientConfig) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return config.api.base_url.clone(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    config.api_base(&protocol, &hostname)
}

/// Path segment escaped for use inside a URL (product codes may carry `/`).
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment(" CX/12 "), "CX%2F12");
        assert_eq!(path_segment("P-01"), "P-01");
    }
}
