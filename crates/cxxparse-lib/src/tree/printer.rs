//! Indented text dump of a parse tree.
//!
//! ```text
//! simpleDeclaration
//!   simpleDeclSpecifierSeq
//!     declSpecifier
//!       ...
//!         Keyword "int"
//!   ...
//!   Punctuator ";"
//! ```

use std::fmt::Write;

use cxxparse_core::{Colors, RuleId};

use super::{Node, ParseTree};

pub struct TreePrinter<'p, 't> {
    tree: &'p ParseTree<'t>,
    spans: bool,
    eof: bool,
    colors: Colors,
}

impl<'p, 't> TreePrinter<'p, 't> {
    pub fn new(tree: &'p ParseTree<'t>) -> Self {
        Self {
            tree,
            spans: false,
            eof: false,
            colors: Colors::OFF,
        }
    }

    /// Append token spans (`[start..end]`) to rule lines and `line:column` to
    /// token lines.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Include the end-of-input leaf matched by the translation unit.
    pub fn with_eof(mut self, value: bool) -> Self {
        self.eof = value;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.tree.root(), 0, w)
    }

    fn format_node(&self, node: Node<'_>, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let c = &self.colors;

        match node {
            Node::Rule(rule) => {
                let color = if rule.rule() == RuleId::RecoveredDeclaration {
                    c.recovered
                } else {
                    c.rule
                };
                write!(w, "{prefix}{color}{}{}", rule.rule(), c.reset)?;
                if self.spans {
                    let span = rule.token_range();
                    write!(w, " {}[{}..{}]{}", c.muted, span.start, span.end, c.reset)?;
                }
                writeln!(w)?;
                for child in rule.children() {
                    self.format_node(child, indent + 1, w)?;
                }
            }
            Node::Token(leaf) => {
                let token = leaf.token();
                if token.is_eof() && !self.eof {
                    return Ok(());
                }
                write!(
                    w,
                    "{prefix}{:?} {}{:?}{}",
                    token.kind, c.text, token.text, c.reset
                )?;
                if self.spans {
                    write!(w, " {}{}:{}{}", c.muted, token.line, token.column, c.reset)?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    }
}
