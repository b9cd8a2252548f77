//! Recognition errors and their rendering.
//!
//! A backtracking parser fails at many positions; the useful one is the
//! furthest token any match attempt reached. The engine tracks it and reports
//! what was expected there.


use std::fmt;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use serde::Serialize;

use cxxparse_core::{RuleId, Token, TokenMatch};

/// Something the parser tried to match at the failure position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Expectation {
    Token(TokenMatch),
    AnyToken,
    EndOfInput,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Token(m) => write!(f, "{m}"),
            Expectation::AnyToken => f.write_str("any token"),
            Expectation::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// The token stream is not derivable from the root rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error(
    "parser expected one of {{{}}} at line {line}, column {column}",
    expected_list(.expected)
)]
pub struct RecognitionError {
    /// Index of the furthest token reached.
    pub position: u32,
    pub line: u32,
    pub column: u32,
    /// Byte offset and length of that token in the source.
    pub offset: u32,
    pub len: u32,
    /// Deduplicated, in the order the parser tried them.
    pub expected: Vec<Expectation>,
    /// Text of the token found there, empty at end of input.
    pub found: String,
    /// Innermost rule being evaluated when the position was first reached.
    pub rule: Option<RuleId>,
}

fn expected_list(expected: &[Expectation]) -> String {
    expected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl RecognitionError {
    pub(crate) fn at(
        position: u32,
        token: &Token,
        expected: Vec<Expectation>,
        rule: Option<RuleId>,
    ) -> Self {
        Self {
            position,
            line: token.line,
            column: token.column,
            offset: token.offset,
            len: token.text.len() as u32,
            expected,
            found: token.text.clone(),
            rule,
        }
    }

    fn label(&self) -> String {
        let found = if self.found.is_empty() {
            "found end of input".to_owned()
        } else {
            format!("found `{}`", self.found)
        };
        match self.rule {
            Some(rule) => format!("{found} in {rule}"),
            None => found,
        }
    }

    /// The message with an annotated snippet of `source`.
    pub fn render(&self, source: &str, path: Option<&str>, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.to_string();
        let label = self.label();
        let start = (self.offset as usize).min(source.len());
        let end = (start + self.len as usize).min(source.len());
        let range = adjust_range(start..end, source.len());

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&label));
        if let Some(p) = path {
            snippet = snippet.path(p);
        }

        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

fn adjust_range(range: std::ops::Range<usize>, limit: usize) -> std::ops::Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range
}
