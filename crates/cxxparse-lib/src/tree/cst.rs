//! Rowan view of a parse tree.
//!
//! Rule nodes become rowan nodes and tokens become rowan tokens, so consumers
//! get parent pointers, sibling navigation and text ranges. The source's
//! whitespace is not part of the token stream, so node text is the
//! concatenation of token texts.

use rowan::{GreenNode, GreenNodeBuilder, Language};

use cxxparse_core::{RuleId, TokenKind};

use super::{Node, ParseTree};

/// Node or token kind. Raw values: rules first (by index), then token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CstKind {
    Rule(RuleId),
    Token(TokenKind),
}

impl From<CstKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: CstKind) -> Self {
        let raw = match kind {
            CstKind::Rule(rule) => rule.index(),
            CstKind::Token(kind) => RuleId::COUNT + kind.index(),
        };
        Self(raw as u16)
    }
}

/// Language tag for rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CxxLang {}

impl Language for CxxLang {
    type Kind = CstKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        let raw = raw.0 as usize;
        if let Some(rule) = RuleId::from_index(raw) {
            return CstKind::Rule(rule);
        }
        match TokenKind::ALL.get(raw - RuleId::COUNT) {
            Some(&kind) => CstKind::Token(kind),
            None => panic!("raw syntax kind {raw} out of range"),
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<CxxLang>;
pub type SyntaxToken = rowan::SyntaxToken<CxxLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

impl ParseTree<'_> {
    /// Builds the rowan tree. A root that collapsed to a single token is
    /// wrapped in a node of the root rule.
    pub fn to_cst(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.to_green())
    }

    pub fn to_green(&self) -> GreenNode {
        let mut builder = GreenNodeBuilder::new();
        let root = self.root();
        if root.rule().is_none() {
            builder.start_node(CstKind::Rule(self.root_rule()).into());
            push_node(&mut builder, root);
            builder.finish_node();
        } else {
            push_node(&mut builder, root);
        }
        builder.finish()
    }
}

fn push_node(builder: &mut GreenNodeBuilder<'static>, node: Node<'_>) {
    match node {
        Node::Rule(rule) => {
            builder.start_node(CstKind::Rule(rule.rule()).into());
            for child in rule.children() {
                push_node(builder, child);
            }
            builder.finish_node();
        }
        Node::Token(leaf) => {
            builder.token(CstKind::Token(leaf.kind()).into(), leaf.text());
        }
    }
}
