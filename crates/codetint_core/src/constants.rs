//! Shared constants used across codetint crates.

/// Theme used when neither the caller nor the environment picks one.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Grammar substituted for unknown languages.
///
/// The bundled syntax set ships no log grammar, so plain text stands in.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "text.plain";

/// Environment variable selecting the default theme.
pub const THEME_ENV: &str = "CODETINT_THEME";
/// Environment variable selecting the appearance mode.
pub const APPEARANCE_ENV: &str = "CODETINT_APPEARANCE";
/// Environment variable overriding the fallback grammar identifier.
pub const FALLBACK_LANGUAGE_ENV: &str = "CODETINT_FALLBACK_LANGUAGE";
/// Boolean flag enabling per-line tokenizer events.
pub const TRACE_ENV: &str = "CODETINT_TRACE";
