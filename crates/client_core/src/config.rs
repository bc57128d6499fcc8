use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "decoder.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub highlight_millis: u64,
    /// Font covering the Linear B block; egui's bundled fonts do not.
    pub glyph_font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: 10,
            highlight_millis: 200,
            glyph_font_path: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_millis)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    highlight_millis: Option<u64>,
    glyph_font_path: Option<PathBuf>,
}

/// Defaults, then `decoder.toml` (or `path`), then environment overrides.
/// Only the default file is optional; an explicit `path` must exist, and an
/// unreadable or invalid file is an error either way.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_SETTINGS_FILE), false),
    };
    let mut settings = Settings::default();

    if required || path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        settings = apply_file(settings, &raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    }

    Ok(apply_env(settings, |name| std::env::var(name).ok()))
}

fn apply_file(mut settings: Settings, raw: &str) -> anyhow::Result<Settings> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.highlight_millis {
        settings.highlight_millis = v;
    }
    if let Some(v) = file_cfg.glyph_font_path {
        settings.glyph_font_path = Some(v);
    }
    Ok(settings)
}

fn apply_env(mut settings: Settings, var: impl Fn(&str) -> Option<String>) -> Settings {
    let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("DECODER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = non_empty("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }
    if let Some(v) = non_empty("APP__HIGHLIGHT_MILLIS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.highlight_millis = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__HIGHLIGHT_MILLIS"),
        }
    }

    if let Some(v) = non_empty("APP__GLYPH_FONT_PATH") {
        settings.glyph_font_path = Some(PathBuf::from(v));
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
