//! Theme rules and the fold that turns them into one resolved style.

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

/// Index into a theme's colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(pub u32);

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Font style bits, numbered like TextMate themes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        const ITALIC = 1;
        const BOLD = 2;
        const UNDERLINE = 4;
    }
}

/// One theme entry that matched a scope path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeRule {
    pub foreground: Option<ColorId>,
    pub background: Option<ColorId>,
    pub font_style: Option<FontStyle>,
}

/// Style left after folding every rule matched for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedStyle {
    pub foreground: Option<ColorId>,
    pub background: Option<ColorId>,
    pub font_style: FontStyle,
}

impl ResolvedStyle {
    /// Folds `rules`, given in precedence order (highest first).
    ///
    /// Colours are assign-once: the first rule that sets a foreground wins
    /// the foreground, and likewise for the background. Font style bits are
    /// OR-ed across every rule.
    pub fn fold(rules: &[ThemeRule]) -> Self {
        let foreground = rules.iter().find_map(|rule| rule.foreground);
        let background = rules.iter().find_map(|rule| rule.background);
        let font_style = rules
            .iter()
            .filter_map(|rule| rule.font_style)
            .fold(FontStyle::empty(), |acc, bits| acc | bits);
        Self {
            foreground,
            background,
            font_style,
        }
    }
}

/// Presentation attributes derived from folded font style bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FontAttributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontAttributes {
    /// Maps font style bits to attributes by exact comparison.
    ///
    /// Only the three single-flag values are recognised. Any combination
    /// (e.g. bold + italic) maps to no attributes at all. This is a known
    /// limitation kept for output compatibility; do not switch to
    /// `contains` checks without revisiting every theme that relies on it.
    pub fn from_exact_bits(bits: FontStyle) -> Self {
        let mut attributes = Self::default();
        if bits == FontStyle::UNDERLINE {
            attributes.underline = true;
        } else if bits == FontStyle::BOLD {
            attributes.bold = true;
        } else if bits == FontStyle::ITALIC {
            attributes.italic = true;
        }
        attributes
    }
}
