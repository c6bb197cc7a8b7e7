use std::{fs, path::Path};

use serde::Deserialize;
use shared::error::TransportError;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "anagrams.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub resource_path: String,
    pub upload_chunk_size: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/".into(),
            resource_path: "anagrams".into(),
            upload_chunk_size: 64 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    resource_path: Option<String>,
    upload_chunk_size: Option<usize>,
}

impl ClientSettings {
    /// Joins base URL and resource path with exactly one `/` between them.
    pub fn endpoint(&self) -> Result<Url, TransportError> {
        let raw_base = self.api_base_url.trim();
        let mut base = Url::parse(raw_base)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{raw_base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidEndpoint(format!(
                "{raw_base}: not a hierarchical URL"
            )));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let resource = self.resource_path.trim().trim_matches('/');
        base.join(resource)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{raw_base} + {resource}: {e}")))
    }

    pub fn chunk_size(&self) -> usize {
        self.upload_chunk_size.max(1)
    }

    /// Applies a command-line base URL on top of file and env settings.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.api_base_url = base_url;
        }
        self
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the optional TOML file, then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.resource_path {
                    settings.resource_path = v;
                }
                if let Some(v) = file_cfg.upload_chunk_size.filter(|v| *v > 0) {
                    settings.upload_chunk_size = v;
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring malformed settings file: {err}"),
        }
    }

    if let Some(v) = env("ANAGRAMS_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__RESOURCE_PATH") {
        settings.resource_path = v;
    }

    if let Some(v) = env("APP__UPLOAD_CHUNK_SIZE") {
        match v.parse::<usize>() {
            Ok(parsed) if parsed > 0 => settings.upload_chunk_size = parsed,
            _ => warn!(value = %v, "ignoring invalid APP__UPLOAD_CHUNK_SIZE"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
