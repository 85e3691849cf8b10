use std::{collections::HashMap, fs, path::PathBuf};

use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const SETTINGS_FILE_NAME: &str = "imageify.toml";
const DATA_DIR_NAME: &str = "imageify";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    /// OAuth client identifier the identity tokens are issued for.
    pub google_client_id: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            google_client_id: None,
            data_dir: None,
        }
    }
}

impl Settings {
    /// Directory holding the persisted session, falling back to the per-user
    /// local data directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|base| base.join(DATA_DIR_NAME))
            .ok_or_else(|| ClientError::Config("unable to resolve local app data dir".into()))
    }
}

/// Loads settings from `imageify.toml` in the working directory, then applies
/// environment overrides. An invalid `api_url` falls back to the default.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE_NAME).ok();
    resolve_settings(file.as_deref(), |name| std::env::var(name).ok())
}

pub(crate) fn resolve_settings(
    file: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();
    if let Some(raw) = file {
        apply_file(&mut settings, raw);
    }
    apply_env(&mut settings, lookup);

    settings.api_url = match normalize_api_url(&settings.api_url) {
        Ok(api_url) => api_url,
        Err(err) => {
            tracing::warn!("{err}; using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        }
    };
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            tracing::warn!("ignoring malformed {SETTINGS_FILE_NAME}: {err}");
            return;
        }
    };
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("google_client_id") {
        settings.google_client_id = non_empty(v);
    }
    if let Some(v) = file_cfg.get("data_dir") {
        settings.data_dir = non_empty(v).map(PathBuf::from);
    }
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for name in ["IMAGEIFY_API_URL", "APP__API_URL"] {
        if let Some(v) = lookup(name) {
            settings.api_url = v;
        }
    }
    for name in ["GOOGLE_CLIENT_ID", "APP__GOOGLE_CLIENT_ID"] {
        if let Some(v) = lookup(name) {
            settings.google_client_id = non_empty(&v);
        }
    }
    for name in ["IMAGEIFY_DATA_DIR", "APP__DATA_DIR"] {
        if let Some(v) = lookup(name) {
            settings.data_dir = non_empty(&v).map(PathBuf::from);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Validates the API base URL and strips any trailing slash.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }

    let parsed =
        Url::parse(raw).map_err(|err| ClientError::Config(format!("api url '{raw}': {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "api url '{raw}' must use http or https"
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ClientError::Config(format!("api url '{raw}' has no host")));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
