use std::{collections::HashMap, fs, time::Duration};

use anyhow::Context;
use serde::Deserialize;

const SETTINGS_FILE: &str = "pokedex.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub pokemon_api_url: String,
    pub tipos_api_url: String,
    pub request_timeout_seconds: u64,
    pub max_form_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            pokemon_api_url: "http://localhost:5000/api".into(),
            tipos_api_url: "http://localhost:5000/api".into(),
            request_timeout_seconds: 30,
            max_form_bytes: 64 * 1024,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the flat settings file, then the environment.
pub fn load_settings_from(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("pokemon_api_url") {
                settings.pokemon_api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("tipos_api_url") {
                settings.tipos_api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("request_timeout_seconds") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.request_timeout_seconds = parsed;
                }
            }
            if let Some(v) = file_cfg.get("max_form_bytes") {
                if let Ok(parsed) = v.parse::<usize>() {
                    settings.max_form_bytes = parsed;
                }
            }
        }
    }

    if let Some(v) = env("POKEDEX_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("POKEMON_API_URL") {
        settings.pokemon_api_url = v;
    }
    if let Some(v) = env("APP__POKEMON_API_URL") {
        settings.pokemon_api_url = v;
    }

    if let Some(v) = env("TIPOS_API_URL") {
        settings.tipos_api_url = v;
    }
    if let Some(v) = env("APP__TIPOS_API_URL") {
        settings.tipos_api_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }
    if let Some(v) = env("APP__MAX_FORM_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_form_bytes = parsed;
        }
    }

    settings
}

pub fn prepare_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let base_url = normalize_base_url(raw_base_url);
    api_client::parse_base_url(&base_url)
        .with_context(|| format!("backend base url '{raw_base_url}' is not usable"))?;
    Ok(base_url)
}

fn normalize_base_url(raw_base_url: &str) -> String {
    let raw_base_url = raw_base_url.trim();

    if raw_base_url.is_empty() {
        return normalize_base_url(&Settings::default().pokemon_api_url);
    }

    let with_scheme = if raw_base_url.contains("://") {
        raw_base_url.to_string()
    } else {
        format!("http://{raw_base_url}")
    };

    format!("{}/", with_scheme.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
