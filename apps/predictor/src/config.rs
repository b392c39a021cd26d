use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "predictor.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `predictor.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

fn resolve_settings(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("base_url") {
                settings.base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("PREDICTOR_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("PREDICTOR_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

pub fn prepare_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let base_url = normalize_base_url(raw_base_url);
    let parsed = Url::parse(&base_url)
        .with_context(|| format!("invalid prediction service url '{base_url}'"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported scheme '{}' in prediction service url '{base_url}'",
            parsed.scheme()
        );
    }
    if parsed.host_str().is_none() {
        bail!("prediction service url '{base_url}' has no host");
    }

    Ok(base_url)
}

fn normalize_base_url(raw_base_url: &str) -> String {
    let raw_base_url = raw_base_url.trim().trim_end_matches('/');

    if raw_base_url.is_empty() {
        return Settings::default().base_url;
    }

    if raw_base_url.contains("://") {
        return raw_base_url.to_string();
    }

    format!("http://{raw_base_url}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
