use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/admin";
pub const SETTINGS_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, Path::new(SETTINGS_FILE));
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

fn apply_file_overrides(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) else {
        tracing::warn!(path = %path.display(), "ignoring malformed settings file");
        return;
    };

    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ADMIN_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

/// Trims whitespace and trailing slashes; blank input falls back to the default.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.to_string()
}
