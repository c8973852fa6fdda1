//! Grammar and theme services backed by syntect's bundled sets.

mod grammar;
mod theme;

use std::sync::Arc;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{Scope, SyntaxReference, SyntaxSet};

use crate::error::RenderError;
use crate::service::HighlightBackend;

pub use grammar::{SyntectGrammar, SyntectState};
pub use theme::SyntectTheme;

/// Name and top-level scope of a registered grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub name: String,
    pub scope: String,
    pub extensions: Vec<String>,
}

/// Syntect syntax and theme sets.
///
/// Syntaxes are the `nonewlines` variant because the driver hands lines
/// over without their line feed.
pub struct SyntectBackend {
    syntaxes: Arc<SyntaxSet>,
    themes: ThemeSet,
}

impl Default for SyntectBackend {
    fn default() -> Self {
        Self::new(SyntaxSet::load_defaults_nonewlines(), ThemeSet::load_defaults())
    }
}

impl SyntectBackend {
    /// Wraps caller-supplied syntax and theme sets.
    ///
    /// # Arguments
    /// - `syntaxes`: built for lines without trailing newlines, since lines
    ///   are handed over with the line feed already stripped.
    /// - `themes`: keyed by the theme ids render calls pass.
    pub fn new(syntaxes: SyntaxSet, themes: ThemeSet) -> Self {
        Self {
            syntaxes: Arc::new(syntaxes),
            themes,
        }
    }

    /// Registered theme ids, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.themes.keys().map(String::as_str).collect()
    }

    /// Registered grammars, sorted by name.
    pub fn languages(&self) -> Vec<LanguageInfo> {
        let mut languages: Vec<LanguageInfo> = self
            .syntaxes
            .syntaxes()
            .iter()
            .map(|syntax| LanguageInfo {
                name: syntax.name.clone(),
                scope: syntax.scope.build_string(),
                extensions: syntax.file_extensions.clone(),
            })
            .collect();
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        languages
    }

    /// Looks up a grammar by top-level scope (`source.rust`), then by
    /// syntect token (name or file extension).
    fn find_syntax(&self, language_id: &str) -> Option<&SyntaxReference> {
        let trimmed = language_id.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(scope) = Scope::new(trimmed) {
            if let Some(syntax) = self.syntaxes.find_syntax_by_scope(scope) {
                return Some(syntax);
            }
        }
        self.syntaxes.find_syntax_by_token(trimmed)
    }
}

impl HighlightBackend for SyntectBackend {
    type Grammar = SyntectGrammar;
    type Theme = SyntectTheme;

    fn load_theme(&self, theme_id: &str) -> Result<SyntectTheme, RenderError> {
        self.themes
            .themes
            .get(theme_id)
            .map(|theme| SyntectTheme::new(theme_id, theme))
            .ok_or_else(|| RenderError::UnknownTheme(theme_id.to_string()))
    }

    fn load_grammar(&self, language_id: &str) -> Result<Option<SyntectGrammar>, RenderError> {
        Ok(self
            .find_syntax(language_id)
            .map(|syntax| SyntectGrammar::new(self.syntaxes.clone(), syntax.clone())))
    }
}
