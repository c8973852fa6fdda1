//! 24-bit ANSI terminal sink.

use codetint_core::{SpanSink, StyledSpan};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// Collects spans as SGR-escaped text, one `\n` per line break.
#[derive(Debug, Default)]
pub struct AnsiSink {
    out: String,
}

impl AnsiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

fn sgr(span: &StyledSpan<'_>) -> String {
    let fg = span.foreground;
    let mut codes = format!("38;2;{};{};{}", fg.r, fg.g, fg.b);
    if let Some(bg) = span.background {
        let _ = write!(codes, ";48;2;{};{};{}", bg.r, bg.g, bg.b);
    }
    if span.attributes.bold {
        codes.push_str(";1");
    }
    if span.attributes.italic {
        codes.push_str(";3");
    }
    if span.attributes.underline {
        codes.push_str(";4");
    }
    codes
}

impl<'a> SpanSink<'a> for AnsiSink {
    fn push_span(&mut self, span: StyledSpan<'a>) {
        let _ = write!(self.out, "\x1b[{}m{}{}", sgr(&span), span.text, RESET);
    }

    fn push_line_break(&mut self) {
        self.out.push('\n');
    }
}
