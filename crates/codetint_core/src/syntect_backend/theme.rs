//! Syntect themes flattened into ordered rules and a colour palette.

use std::cmp::Ordering;
use std::collections::HashMap;
use syntect::highlighting::{self, ScopeSelectors};
use syntect::parsing::Scope;

use crate::service::Theme;
use crate::style::{ColorId, FontStyle, ThemeRule};

/// A syntect theme answering rule matches by scope selector.
pub struct SyntectTheme {
    name: String,
    rules: Vec<(ScopeSelectors, ThemeRule)>,
    palette: Vec<String>,
}

#[derive(Default)]
struct Palette {
    colors: Vec<String>,
    ids: HashMap<String, ColorId>,
}

impl Palette {
    /// Interns a colour as `#rrggbb`; alpha is dropped.
    fn intern(&mut self, color: highlighting::Color) -> ColorId {
        let hex = format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
        if let Some(id) = self.ids.get(&hex) {
            return *id;
        }
        let id = ColorId(self.colors.len() as u32);
        self.colors.push(hex.clone());
        self.ids.insert(hex, id);
        id
    }
}

fn convert_font_style(style: highlighting::FontStyle) -> FontStyle {
    let mut bits = FontStyle::empty();
    if style.contains(highlighting::FontStyle::BOLD) {
        bits |= FontStyle::BOLD;
    }
    if style.contains(highlighting::FontStyle::ITALIC) {
        bits |= FontStyle::ITALIC;
    }
    if style.contains(highlighting::FontStyle::UNDERLINE) {
        bits |= FontStyle::UNDERLINE;
    }
    bits
}

impl SyntectTheme {
    pub fn new(name: &str, theme: &highlighting::Theme) -> Self {
        let mut palette = Palette::default();
        let rules = theme
            .scopes
            .iter()
            .map(|item| {
                let rule = ThemeRule {
                    foreground: item.style.foreground.map(|c| palette.intern(c)),
                    background: item.style.background.map(|c| palette.intern(c)),
                    font_style: item.style.font_style.map(convert_font_style),
                };
                (item.scope.clone(), rule)
            })
            .collect();
        Self {
            name: name.to_string(),
            rules,
            palette: palette.colors,
        }
    }
}

impl Theme for SyntectTheme {
    fn name(&self) -> &str {
        &self.name
    }

    /// Orders matches by selector match power, strongest first. Equal
    /// powers put the later-declared rule first.
    fn match_scopes(&self, scopes: &[String]) -> Vec<ThemeRule> {
        let stack: Vec<Scope> = scopes
            .iter()
            .filter_map(|name| Scope::new(name).ok())
            .collect();
        let mut matched: Vec<(f64, usize, ThemeRule)> = self
            .rules
            .iter()
            .enumerate()
            .filter_map(|(index, (selector, rule))| {
                selector
                    .does_match(&stack)
                    .map(|power| (power.0, index, *rule))
            })
            .collect();
        matched.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.cmp(&a.1))
        });
        matched.into_iter().map(|(_, _, rule)| rule).collect()
    }

    fn color_string(&self, id: ColorId) -> Option<&str> {
        self.palette.get(id.0 as usize).map(String::as_str)
    }
}
