//! Render configuration loaded from environment variables.

use serde::Deserialize;
use std::env;

use crate::appearance::Appearance;
use crate::constants::{
    APPEARANCE_ENV, DEFAULT_FALLBACK_LANGUAGE, DEFAULT_THEME, FALLBACK_LANGUAGE_ENV, THEME_ENV,
    TRACE_ENV,
};

/// Defaults applied when a render call does not name them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub theme: String,
    pub appearance: Appearance,
    pub fallback_language: String,
    /// Emit one tracing event per tokenized line.
    pub trace: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            appearance: Appearance::Default,
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
            trace: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment; missing or unrecognized is `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl RenderConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let appearance = match env::var(APPEARANCE_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("ignoring {}: {}", APPEARANCE_ENV, err);
                defaults.appearance
            }),
            Err(_) => defaults.appearance,
        };
        Self {
            theme: non_empty_env(THEME_ENV).unwrap_or(defaults.theme),
            appearance,
            fallback_language: non_empty_env(FALLBACK_LANGUAGE_ENV)
                .unwrap_or(defaults.fallback_language),
            trace: env_flag_enabled(TRACE_ENV),
        }
    }
}
