//! Collaborator contracts: grammar, theme and the backend that loads them.

use std::ops::Range;
use std::time::Duration;

use crate::error::RenderError;
use crate::style::{ColorId, ThemeRule};

/// Time a tokenizer may spend on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBudget {
    #[default]
    Unbounded,
    Limited(Duration),
}

/// A tokenized region of one line.
///
/// Offsets are byte offsets into the line text and are not trusted: they
/// may point past the end of the line or at non-char boundaries and are
/// clamped before slicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    /// Scope names, outermost first.
    pub scopes: Vec<String>,
}

impl Token {
    /// Token covering `range`, scopes outermost first.
    pub fn new(range: Range<usize>, scopes: Vec<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            scopes,
        }
    }
}

/// Tokenizer output for one line plus the state the next line starts from.
#[derive(Debug, Clone)]
pub struct TokenizedLine<S> {
    pub tokens: Vec<Token>,
    pub state: S,
}

/// A language tokenizer.
pub trait Grammar: Send + Sync {
    /// Lexer state carried from one line to the next.
    type State: Clone;

    /// Identifier the grammar was loaded under.
    fn scope_name(&self) -> &str;

    /// State before the first line of a document.
    fn initial_state(&self) -> Self::State;

    /// Tokenizes `line` (no trailing line feed) starting from `state`.
    fn tokenize_line(
        &self,
        line: &str,
        state: &Self::State,
        budget: TimeBudget,
    ) -> Result<TokenizedLine<Self::State>, RenderError>;
}

/// An ordered set of colour rules.
pub trait Theme: Send + Sync {
    fn name(&self) -> &str;

    /// Rules matching `scopes`, highest precedence first.
    fn match_scopes(&self, scopes: &[String]) -> Vec<ThemeRule>;

    /// Hex string (`#rrggbb` or `rrggbb`) for a colour id.
    fn color_string(&self, id: ColorId) -> Option<&str>;
}

/// Grammar and theme registry.
pub trait HighlightBackend: Send + Sync {
    type Grammar: Grammar;
    type Theme: Theme;

    /// Loads a bundled theme.
    ///
    /// # Errors
    /// [`RenderError::UnknownTheme`] when no theme is registered under `theme_id`.
    fn load_theme(&self, theme_id: &str) -> Result<Self::Theme, RenderError>;

    /// Loads the grammar for `language_id`, `Ok(None)` when unregistered.
    fn load_grammar(&self, language_id: &str) -> Result<Option<Self::Grammar>, RenderError>;
}
