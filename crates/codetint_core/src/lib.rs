//! Core library for codetint: turns source text, a grammar and a theme into
//! styled text spans.
//!
//! Data flows one way: [`resolver`] picks the cached (grammar, theme) pair,
//! [`tokenize`] drives the grammar line by line, and [`span`] resolves each
//! token's style and emits spans and line breaks.

/// Host appearance mode and default foreground.
pub mod appearance;
/// Hex colour decoding.
pub mod color;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Environment mutation helpers for tests.
pub mod env;
/// Error types.
pub mod error;
/// Whole-document render entry point.
pub mod render;
/// Grammar/theme resolver cache.
pub mod resolver;
/// Grammar, theme and backend contracts.
pub mod service;
/// Style resolution and span building.
pub mod span;
/// Theme rules and style folding.
pub mod style;
/// Syntect-backed grammar and theme services.
pub mod syntect_backend;
/// Line tokenizer driver.
pub mod tokenize;

#[cfg(test)]
pub(crate) mod test_support;

pub use appearance::Appearance;
pub use color::Rgb;
pub use config::RenderConfig;
pub use constants::{DEFAULT_FALLBACK_LANGUAGE, DEFAULT_THEME};
pub use error::{FormatError, RenderError};
pub use render::{RenderedDocument, Renderer};
pub use resolver::{GrammarSource, GrammarThemeKey, ResolverCache};
pub use service::{Grammar, HighlightBackend, Theme, TimeBudget, Token, TokenizedLine};
pub use span::{RenderItem, SpanBuilder, SpanSink, StyledSpan};
pub use style::{ColorId, FontAttributes, FontStyle, ResolvedStyle, ThemeRule};
pub use syntect_backend::SyntectBackend;
