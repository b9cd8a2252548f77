//! Expression tree definition.

use std::fmt;

use serde::Serialize;

use crate::{Keyword, RuleId, Token, TokenKind};

/// Leaf predicate on a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenMatch {
    /// Exact text, any kind except end of input. Covers punctuators and
    /// contextual words such as `ref`, `each` or `sealed`.
    Text(&'static str),
    /// A reserved word. Identifiers spelled like the keyword do not match.
    Keyword(Keyword),
    /// Any token of the kind, e.g. every identifier or the end of input.
    Kind(TokenKind),
}

impl TokenMatch {
    pub fn matches(&self, token: &Token) -> bool {
        match *self {
            TokenMatch::Text(text) => token.kind != TokenKind::Eof && token.text == text,
            TokenMatch::Keyword(keyword) => token.is_keyword(keyword.as_str()),
            TokenMatch::Kind(kind) => token.kind == kind,
        }
    }
}

impl fmt::Display for TokenMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMatch::Text(text) => write!(f, "\"{text}\""),
            TokenMatch::Keyword(keyword) => write!(f, "\"{keyword}\""),
            TokenMatch::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

/// Rule body combinator.
///
/// Build trees with the smart constructors or the crate's macros rather than
/// the variants: they keep the tree normalized (see [`Expr::sequence`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Token(TokenMatch),
    /// Any single token except end of input.
    AnyToken,
    Rule(RuleId),
    Sequence(Vec<Expr>),
    /// Ordered choice: the first alternative that matches wins.
    FirstOf(Vec<Expr>),
    Optional(Box<Expr>),
    ZeroOrMore(Box<Expr>),
    OneOrMore(Box<Expr>),
    /// Positive lookahead. Consumes nothing.
    Next(Box<Expr>),
    /// Negative lookahead. Consumes nothing.
    NextNot(Box<Expr>),
    /// Matches the empty input.
    Epsilon,
    /// Never matches. Stands in for alternatives of disabled dialects.
    Never,
}

impl Expr {
    /// `Never` anywhere makes the whole sequence `Never`; `Epsilon` items are
    /// dropped; a single item is returned as is.
    pub fn sequence(items: impl IntoIterator<Item = Expr>) -> Expr {
        let mut out = Vec::new();
        for item in items {
            match item {
                Expr::Never => return Expr::Never,
                Expr::Epsilon => {}
                other => out.push(other),
            }
        }
        if out.len() <= 1 {
            return out.pop().unwrap_or(Expr::Epsilon);
        }
        Expr::Sequence(out)
    }

    /// `Never` alternatives are dropped; a single alternative is returned as is.
    pub fn first_of(alternatives: impl IntoIterator<Item = Expr>) -> Expr {
        let mut out: Vec<Expr> = alternatives
            .into_iter()
            .filter(|alt| *alt != Expr::Never)
            .collect();
        if out.len() <= 1 {
            return out.pop().unwrap_or(Expr::Never);
        }
        Expr::FirstOf(out)
    }

    pub fn optional(inner: Expr) -> Expr {
        match inner {
            Expr::Never | Expr::Epsilon => Expr::Epsilon,
            inner => Expr::Optional(Box::new(inner)),
        }
    }

    pub fn zero_or_more(inner: Expr) -> Expr {
        match inner {
            Expr::Never | Expr::Epsilon => Expr::Epsilon,
            inner => Expr::ZeroOrMore(Box::new(inner)),
        }
    }

    pub fn one_or_more(inner: Expr) -> Expr {
        match inner {
            Expr::Never | Expr::Epsilon => inner,
            inner => Expr::OneOrMore(Box::new(inner)),
        }
    }

    pub fn next(inner: Expr) -> Expr {
        match inner {
            Expr::Never | Expr::Epsilon => inner,
            inner => Expr::Next(Box::new(inner)),
        }
    }

    pub fn next_not(inner: Expr) -> Expr {
        match inner {
            Expr::Never => Expr::Epsilon,
            Expr::Epsilon => Expr::Never,
            inner => Expr::NextNot(Box::new(inner)),
        }
    }

    /// Every rule mentioned in this expression, in first-mention order.
    pub fn references(&self) -> Vec<RuleId> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<RuleId>) {
        match self {
            Expr::Rule(rule) => {
                if !out.contains(rule) {
                    out.push(*rule);
                }
            }
            Expr::Sequence(items) | Expr::FirstOf(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Expr::Optional(inner)
            | Expr::ZeroOrMore(inner)
            | Expr::OneOrMore(inner)
            | Expr::Next(inner)
            | Expr::NextNot(inner) => inner.collect_references(out),
            Expr::Token(_) | Expr::AnyToken | Expr::Epsilon | Expr::Never => {}
        }
    }

    fn is_atom(&self) -> bool {
        matches!(
            self,
            Expr::Token(_) | Expr::AnyToken | Expr::Rule(_) | Expr::Epsilon | Expr::Never
        )
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

/// PEG-style notation: `a b`, `a / b`, `a?`, `a*`, `a+`, `&a`, `!a`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Token(m) => write!(f, "{m}"),
            Expr::AnyToken => f.write_str("ANY"),
            Expr::Rule(rule) => write!(f, "{rule}"),
            Expr::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    if matches!(item, Expr::FirstOf(_)) {
                        write!(f, "({item})")?;
                    } else {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Expr::FirstOf(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" / ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            Expr::Optional(inner) => {
                inner.fmt_operand(f)?;
                f.write_str("?")
            }
            Expr::ZeroOrMore(inner) => {
                inner.fmt_operand(f)?;
                f.write_str("*")
            }
            Expr::OneOrMore(inner) => {
                inner.fmt_operand(f)?;
                f.write_str("+")
            }
            Expr::Next(inner) => {
                f.write_str("&")?;
                inner.fmt_operand(f)
            }
            Expr::NextNot(inner) => {
                f.write_str("!")?;
                inner.fmt_operand(f)
            }
            Expr::Epsilon => f.write_str("()"),
            Expr::Never => f.write_str("NEVER"),
        }
    }
}

impl From<&'static str> for Expr {
    fn from(text: &'static str) -> Self {
        Expr::Token(TokenMatch::Text(text))
    }
}

impl From<Keyword> for Expr {
    fn from(keyword: Keyword) -> Self {
        Expr::Token(TokenMatch::Keyword(keyword))
    }
}

impl From<TokenKind> for Expr {
    fn from(kind: TokenKind) -> Self {
        Expr::Token(TokenMatch::Kind(kind))
    }
}

impl From<TokenMatch> for Expr {
    fn from(m: TokenMatch) -> Self {
        Expr::Token(m)
    }
}

impl From<RuleId> for Expr {
    fn from(rule: RuleId) -> Self {
        Expr::Rule(rule)
    }
}

pub fn any_token() -> Expr {
    Expr::AnyToken
}

/// `expr` when the dialect feature is enabled, otherwise `Never`.
///
/// Inside `first_of!` a gated-off alternative disappears; inside `opt!` it
/// becomes the empty match.
pub fn gate(enabled: bool, expr: impl Into<Expr>) -> Expr {
    if enabled { expr.into() } else { Expr::Never }
}
