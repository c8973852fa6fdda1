//! Style resolution and styled span construction.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;

use crate::appearance::Appearance;
use crate::color::Rgb;
use crate::error::{FormatError, RenderError};
use crate::service::{Theme, Token};
use crate::style::{ColorId, FontAttributes, ResolvedStyle};

/// A run of text with one resolved visual style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan<'a> {
    pub text: &'a str,
    pub foreground: Rgb,
    /// `None` means nothing is painted behind the text.
    pub background: Option<Rgb>,
    pub attributes: FontAttributes,
}

/// One entry of the rendered output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderItem<'a> {
    Span(StyledSpan<'a>),
    LineBreak,
}

/// Presentation layer receiving spans and line breaks in order.
pub trait SpanSink<'a> {
    fn push_span(&mut self, span: StyledSpan<'a>);
    fn push_line_break(&mut self);
}

impl<'a> SpanSink<'a> for Vec<RenderItem<'a>> {
    fn push_span(&mut self, span: StyledSpan<'a>) {
        self.push(RenderItem::Span(span));
    }

    fn push_line_break(&mut self) {
        self.push(RenderItem::LineBreak);
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Clamps token offsets into `line`, returning `None` for degenerate tokens.
///
/// Both ends are clamped to `line.len()` and moved down to a char boundary,
/// so adjacent tokens that split a multi-byte char still meet without gap
/// or overlap.
pub fn clamp_token_range(line: &str, start: usize, end: usize) -> Option<Range<usize>> {
    let start = floor_char_boundary(line, start);
    let end = floor_char_boundary(line, end);
    if end <= start {
        return None;
    }
    Some(start..end)
}

/// Turns tokens into styled spans against one theme and appearance.
///
/// Decoded colours are memoized per builder, so a builder should not
/// outlive the theme it was created for.
pub struct SpanBuilder<'t, T: Theme + ?Sized> {
    theme: &'t T,
    appearance: Appearance,
    colors: HashMap<ColorId, Rgb>,
}

impl<'t, T: Theme + ?Sized> SpanBuilder<'t, T> {
    /// Creates a builder with an empty colour memo.
    ///
    /// # Arguments
    /// - `theme`: answers rule matches and colour strings.
    /// - `appearance`: picks the foreground for tokens no rule coloured.
    pub fn new(theme: &'t T, appearance: Appearance) -> Self {
        Self {
            theme,
            appearance,
            colors: HashMap::new(),
        }
    }

    fn color(&mut self, id: ColorId) -> Result<Rgb, FormatError> {
        if let Some(rgb) = self.colors.get(&id) {
            return Ok(*rgb);
        }
        let hex = self
            .theme
            .color_string(id)
            .ok_or(FormatError::MissingColor(id))?;
        let rgb = Rgb::from_hex(hex)?;
        self.colors.insert(id, rgb);
        Ok(rgb)
    }

    /// Folds the theme rules matched by `scopes`.
    pub fn resolve_style(&self, scopes: &[String]) -> ResolvedStyle {
        ResolvedStyle::fold(&self.theme.match_scopes(scopes))
    }

    /// Builds the span for one token, `Ok(None)` when the token is degenerate.
    ///
    /// # Errors
    /// [`FormatError`] when a matched colour id has no colour string or the
    /// string is not a six-digit hex colour.
    pub fn span_for_token<'a>(
        &mut self,
        line: &'a str,
        token: &Token,
    ) -> Result<Option<StyledSpan<'a>>, FormatError> {
        let Some(range) = clamp_token_range(line, token.start, token.end) else {
            return Ok(None);
        };
        let style = self.resolve_style(&token.scopes);
        let foreground = match style.foreground {
            Some(id) => self.color(id)?,
            None => self.appearance.default_foreground(),
        };
        let background = style.background.map(|id| self.color(id)).transpose()?;
        Ok(Some(StyledSpan {
            text: &line[range],
            foreground,
            background,
            attributes: FontAttributes::from_exact_bits(style.font_style),
        }))
    }

    /// Emits every span of one line followed by a line break.
    pub fn build_line<'a>(
        &mut self,
        line: &'a str,
        tokens: &[Token],
        sink: &mut dyn SpanSink<'a>,
    ) -> Result<(), RenderError> {
        for token in tokens {
            if let Some(span) = self.span_for_token(line, token)? {
                sink.push_span(span);
            }
        }
        sink.push_line_break();
        Ok(())
    }
}
