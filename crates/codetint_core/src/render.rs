//! Whole-document rendering: resolve, tokenize, style.
//!
//! A render is one blocking call with no suspension points. Callers that
//! need cancellation must run it on a task they can abandon.

use std::time::Instant;
use tracing::info;

use crate::appearance::Appearance;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::resolver::{GrammarSource, ResolverCache};
use crate::service::{Grammar, HighlightBackend};
use crate::span::{RenderItem, SpanBuilder, SpanSink, StyledSpan};
use crate::tokenize::tokenize_document;

/// Complete output of one render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedDocument<'a> {
    pub items: Vec<RenderItem<'a>>,
    pub source: Option<GrammarSource>,
}

impl<'a> RenderedDocument<'a> {
    /// Styled spans in output order, line breaks skipped.
    pub fn spans(&self) -> impl Iterator<Item = &StyledSpan<'a>> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Span(span) => Some(span),
            RenderItem::LineBreak => None,
        })
    }

    /// Number of line breaks, which equals the number of input lines.
    pub fn line_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RenderItem::LineBreak))
            .count()
    }

    /// Hands every item, in order, to `sink`.
    pub fn replay(&self, sink: &mut dyn SpanSink<'a>) {
        for item in &self.items {
            match item {
                RenderItem::Span(span) => sink.push_span(span.clone()),
                RenderItem::LineBreak => sink.push_line_break(),
            }
        }
    }
}

/// Renders source text through a cached grammar/theme backend.
pub struct Renderer<B: HighlightBackend> {
    cache: ResolverCache<B>,
    config: RenderConfig,
}

impl<B: HighlightBackend> Renderer<B> {
    /// Creates a renderer with an empty resolver cache.
    ///
    /// # Arguments
    /// - `backend`: grammar and theme registry the cache loads from.
    /// - `config`: default theme and appearance, fallback grammar id, and
    ///   whether the tokenizer traces each line.
    pub fn new(backend: B, config: RenderConfig) -> Self {
        Self {
            cache: ResolverCache::new(backend, &config.fallback_language),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Resolver cache shared by every render on this renderer.
    pub fn cache(&self) -> &ResolverCache<B> {
        &self.cache
    }

    /// Renders with the configured theme and appearance.
    pub fn render_with_defaults<'a>(
        &self,
        code: &'a str,
        language: &str,
    ) -> Result<RenderedDocument<'a>, RenderError> {
        self.render(code, language, &self.config.theme, self.config.appearance)
    }

    /// Renders `code` into styled spans, one line break after every line.
    ///
    /// Lexer state is local to this call. Any error aborts the whole render
    /// and no partial output is returned.
    ///
    /// # Errors
    /// Resolution errors from the cache, tokenizer errors, and
    /// [`crate::FormatError`] for undecodable theme colours.
    pub fn render<'a>(
        &self,
        code: &'a str,
        language: &str,
        theme: &str,
        appearance: Appearance,
    ) -> Result<RenderedDocument<'a>, RenderError> {
        let started = Instant::now();
        let entry = self.cache.resolve(language, theme)?;
        let mut builder = SpanBuilder::new(&entry.theme, appearance);
        let mut items: Vec<RenderItem<'a>> = Vec::new();

        for line in tokenize_document(code, &entry.grammar).with_trace(self.config.trace) {
            let line = line?;
            builder.build_line(line.line, &line.tokens, &mut items)?;
        }

        let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;
        info!(
            target: "codetint_core::render",
            event = "render_done",
            language,
            grammar = entry.grammar.scope_name(),
            theme,
            appearance = appearance.as_str(),
            text_len = code.len(),
            items = items.len(),
            elapsed_ms = elapsed_ms,
            "render pass"
        );
        Ok(RenderedDocument {
            items,
            source: Some(entry.source),
        })
    }
}
