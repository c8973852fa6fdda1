//! Line-by-line tokenizer driver.
//!
//! Lexer state lives in the [`DocumentTokens`] iterator that owns one
//! document pass, so two documents tokenized at the same time never see
//! each other's state.

use std::str::Split;
use tracing::info;

use crate::error::RenderError;
use crate::service::{Grammar, TimeBudget, Token};

/// One input line and its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens<'a> {
    pub line: &'a str,
    pub tokens: Vec<Token>,
}

/// Splits on `'\n'` only.
///
/// A `'\r'` before the line feed stays in the line text and is rendered
/// as-is. Text ending with a line feed yields a trailing empty line, and
/// empty text yields one empty line.
pub fn split_lines(text: &str) -> Split<'_, char> {
    text.split('\n')
}

/// Lazily tokenizes a document, threading lexer state through each line.
pub struct DocumentTokens<'a, 'g, G: Grammar> {
    grammar: &'g G,
    lines: Split<'a, char>,
    state: G::State,
    line_index: usize,
    trace: bool,
    failed: bool,
}

/// Starts tokenizing `text` with `grammar` from the grammar's initial state.
pub fn tokenize_document<'a, 'g, G: Grammar>(
    text: &'a str,
    grammar: &'g G,
) -> DocumentTokens<'a, 'g, G> {
    DocumentTokens {
        grammar,
        lines: split_lines(text),
        state: grammar.initial_state(),
        line_index: 0,
        trace: false,
        failed: false,
    }
}

impl<'a, 'g, G: Grammar> DocumentTokens<'a, 'g, G> {
    /// Emits one `info` event per tokenized line (target
    /// `codetint_core::tokenize`, `event = "line"`).
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// State the next line will start from.
    pub fn state(&self) -> &G::State {
        &self.state
    }
}

impl<'a, 'g, G: Grammar> Iterator for DocumentTokens<'a, 'g, G> {
    type Item = Result<LineTokens<'a>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.lines.next()?;
        let tokenized = match self
            .grammar
            .tokenize_line(line, &self.state, TimeBudget::Unbounded)
        {
            Ok(tokenized) => tokenized,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };
        self.state = tokenized.state;
        if self.trace {
            info!(
                target: "codetint_core::tokenize",
                event = "line",
                grammar = self.grammar.scope_name(),
                line = self.line_index,
                len = line.len(),
                tokens = tokenized.tokens.len(),
                "tokenized line"
            );
        }
        self.line_index += 1;
        Some(Ok(LineTokens {
            line,
            tokens: tokenized.tokens,
        }))
    }
}
