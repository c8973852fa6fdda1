//! Syntect parse state driven one line at a time.

use std::sync::Arc;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use crate::error::RenderError;
use crate::service::{Grammar, TimeBudget, Token, TokenizedLine};

/// Lexer state between lines: the parser's context stack and the scope
/// stack its ops have built so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntectState {
    parse: ParseState,
    scopes: ScopeStack,
}

/// A syntect syntax definition used as a [`Grammar`].
pub struct SyntectGrammar {
    syntaxes: Arc<SyntaxSet>,
    syntax: SyntaxReference,
    scope_name: String,
}

impl SyntectGrammar {
    pub(super) fn new(syntaxes: Arc<SyntaxSet>, syntax: SyntaxReference) -> Self {
        let scope_name = syntax.scope.build_string();
        Self {
            syntaxes,
            syntax,
            scope_name,
        }
    }
}

fn scope_names(scopes: &ScopeStack) -> Vec<String> {
    scopes
        .as_slice()
        .iter()
        .map(|scope| scope.build_string())
        .collect()
}

impl Grammar for SyntectGrammar {
    type State = SyntectState;

    fn scope_name(&self) -> &str {
        &self.scope_name
    }

    fn initial_state(&self) -> SyntectState {
        SyntectState {
            parse: ParseState::new(&self.syntax),
            scopes: ScopeStack::new(),
        }
    }

    /// Syntect has no time limit, so `budget` is not enforced.
    fn tokenize_line(
        &self,
        line: &str,
        state: &SyntectState,
        _budget: TimeBudget,
    ) -> Result<TokenizedLine<SyntectState>, RenderError> {
        let mut parse = state.parse.clone();
        let mut scopes = state.scopes.clone();
        let ops = parse.parse_line(line, &self.syntaxes)?;

        let mut tokens = Vec::with_capacity(ops.len() + 1);
        let mut cursor = 0usize;
        for (offset, op) in ops {
            if offset > cursor {
                tokens.push(Token::new(cursor..offset, scope_names(&scopes)));
                cursor = offset;
            }
            scopes.apply(&op)?;
        }
        if cursor < line.len() || tokens.is_empty() {
            tokens.push(Token::new(cursor..line.len(), scope_names(&scopes)));
        }

        Ok(TokenizedLine {
            tokens,
            state: SyntectState { parse, scopes },
        })
    }
}
