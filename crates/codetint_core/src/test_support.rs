//! Shared test-only collaborators for codetint_core.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::error::RenderError;
use crate::service::{Grammar, HighlightBackend, Theme, TimeBudget, Token, TokenizedLine};
use crate::style::{ColorId, ThemeRule};

/// Grammar emitting one token per line and counting lines in its state.
///
/// The token's scopes are the grammar scope and `line.<n>` for the zero-based
/// line index. Blank lines produce a single zero-width token.
pub(crate) struct ScriptedGrammar {
    scope: String,
    fail_on: Option<String>,
    seen_states: Mutex<Vec<u32>>,
    seen_budgets: Mutex<Vec<TimeBudget>>,
}

impl ScriptedGrammar {
    pub(crate) fn whole_line(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            fail_on: None,
            seen_states: Mutex::new(Vec::new()),
            seen_budgets: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_on(mut self, line: &str) -> Self {
        self.fail_on = Some(line.to_string());
        self
    }

    pub(crate) fn seen_states(&self) -> Vec<u32> {
        self.seen_states.lock().expect("states lock").clone()
    }

    pub(crate) fn seen_budgets(&self) -> Vec<TimeBudget> {
        self.seen_budgets.lock().expect("budgets lock").clone()
    }
}

impl Grammar for ScriptedGrammar {
    type State = u32;

    fn scope_name(&self) -> &str {
        &self.scope
    }

    fn initial_state(&self) -> u32 {
        0
    }

    fn tokenize_line(
        &self,
        line: &str,
        state: &u32,
        budget: TimeBudget,
    ) -> Result<TokenizedLine<u32>, RenderError> {
        self.seen_states.lock().expect("states lock").push(*state);
        self.seen_budgets.lock().expect("budgets lock").push(budget);
        if self.fail_on.as_deref() == Some(line) {
            return Err(RenderError::Tokenize(format!("scripted failure on '{}'", line)));
        }
        Ok(TokenizedLine {
            tokens: vec![Token::new(
                0..line.len(),
                vec![self.scope.clone(), format!("line.{}", state)],
            )],
            state: state + 1,
        })
    }
}

/// Theme whose rules match on exact scope names, in declaration order.
pub(crate) struct ScriptedTheme {
    name: String,
    rules: Vec<(String, ThemeRule)>,
    colors: Vec<String>,
}

impl ScriptedTheme {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Registers a colour string and returns its id.
    pub(crate) fn color(&mut self, hex: &str) -> ColorId {
        self.colors.push(hex.to_string());
        ColorId((self.colors.len() - 1) as u32)
    }

    pub(crate) fn rule(mut self, scope: &str, rule: ThemeRule) -> Self {
        self.rules.push((scope.to_string(), rule));
        self
    }
}

impl Theme for ScriptedTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_scopes(&self, scopes: &[String]) -> Vec<ThemeRule> {
        self.rules
            .iter()
            .filter(|(scope, _)| scopes.iter().any(|candidate| candidate == scope))
            .map(|(_, rule)| *rule)
            .collect()
    }

    fn color_string(&self, id: ColorId) -> Option<&str> {
        self.colors.get(id.0 as usize).map(String::as_str)
    }
}

/// Backend knowing a fixed set of grammar ids and theme ids.
pub(crate) struct ScriptedBackend {
    languages: HashSet<String>,
    broken_languages: HashSet<String>,
    themes: HashSet<String>,
    theme_colors: Vec<(String, String)>,
    load_delay: Duration,
    grammar_loads: Mutex<HashMap<String, usize>>,
    theme_loads: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn new(languages: &[&str], themes: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|id| id.to_string()).collect(),
            broken_languages: HashSet::new(),
            themes: themes.iter().map(|id| id.to_string()).collect(),
            theme_colors: Vec::new(),
            load_delay: Duration::ZERO,
            grammar_loads: Mutex::new(HashMap::new()),
            theme_loads: AtomicUsize::new(0),
        }
    }

    /// Languages whose grammar load returns an error instead of `None`.
    pub(crate) fn with_broken(mut self, language: &str) -> Self {
        self.broken_languages.insert(language.to_string());
        self
    }

    /// Every loaded theme colours `scope` with the (possibly malformed) `hex`.
    pub(crate) fn with_theme_color(mut self, scope: &str, hex: &str) -> Self {
        self.theme_colors.push((scope.to_string(), hex.to_string()));
        self
    }

    pub(crate) fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub(crate) fn grammar_loads(&self, language: &str) -> usize {
        self.grammar_loads
            .lock()
            .expect("loads lock")
            .get(language)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn theme_loads(&self) -> usize {
        self.theme_loads.load(Ordering::SeqCst)
    }
}

impl HighlightBackend for ScriptedBackend {
    type Grammar = ScriptedGrammar;
    type Theme = ScriptedTheme;

    fn load_theme(&self, theme_id: &str) -> Result<ScriptedTheme, RenderError> {
        self.theme_loads.fetch_add(1, Ordering::SeqCst);
        if !self.themes.contains(theme_id) {
            return Err(RenderError::UnknownTheme(theme_id.to_string()));
        }
        let mut theme = ScriptedTheme::new(theme_id);
        for (scope, hex) in &self.theme_colors {
            let foreground = theme.color(hex);
            theme = theme.rule(
                scope,
                ThemeRule {
                    foreground: Some(foreground),
                    ..ThemeRule::default()
                },
            );
        }
        Ok(theme)
    }

    fn load_grammar(&self, language_id: &str) -> Result<Option<ScriptedGrammar>, RenderError> {
        *self
            .grammar_loads
            .lock()
            .expect("loads lock")
            .entry(language_id.to_string())
            .or_insert(0) += 1;
        if !self.load_delay.is_zero() {
            thread::sleep(self.load_delay);
        }
        if self.broken_languages.contains(language_id) {
            return Err(RenderError::Tokenize(format!(
                "grammar '{}' failed to compile",
                language_id
            )));
        }
        Ok(self
            .languages
            .contains(language_id)
            .then(|| ScriptedGrammar::whole_line(language_id)))
    }
}
