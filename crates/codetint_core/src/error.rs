//! Error types for colour decoding and document rendering.
use thiserror::Error;

use crate::style::ColorId;

/// Failure to turn a theme colour into RGB bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Colour '{value}' must have exactly 6 hex digits, found {len}")]
    InvalidLength { value: String, len: usize },

    #[error("Colour '{0}' contains a non-hex digit")]
    InvalidDigit(String),

    #[error("Theme has no colour string for colour id {0}")]
    MissingColor(ColorId),
}

/// Top-level render error type.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("No grammar for '{language}' and fallback '{fallback}' is unavailable")]
    GrammarUnavailable { language: String, fallback: String },

    #[error("Tokenizer error: {0}")]
    Tokenize(String),
}

impl From<syntect::parsing::ParsingError> for RenderError {
    fn from(value: syntect::parsing::ParsingError) -> Self {
        Self::Tokenize(value.to_string())
    }
}

impl From<syntect::parsing::ScopeError> for RenderError {
    fn from(value: syntect::parsing::ScopeError) -> Self {
        Self::Tokenize(format!("{:?}", value))
    }
}
