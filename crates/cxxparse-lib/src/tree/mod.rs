//! Parse tree produced by the engine.
//!
//! The tree borrows the token stream it was parsed from. Rule nodes live in
//! one vector in preorder; each node's children are a contiguous slice of a
//! second vector. A child is either another rule node or a token index.
//!
//! [`Node`] is a cheap copyable handle for walking the tree. There are no
//! parent pointers; [`ParseTree::to_cst`] gives a rowan view that has them.

pub mod cst;
pub mod printer;

#[cfg(test)]
mod tree_tests;

use std::ops::Range;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use cxxparse_core::{RuleId, Token, TokenKind, TokenStream};

pub use printer::TreePrinter;

/// Index of a rule node in [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child slot: a rule node or a token (by index into the token stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Rule(NodeId),
    Token(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) rule: RuleId,
    /// Token span `[start, end)`.
    pub(crate) span: Range<u32>,
    /// Range in `ParseTree::children`.
    pub(crate) children: Range<u32>,
}

/// A declaration the parser could not read and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveredDeclaration {
    /// Line of the first skipped token.
    pub line: u32,
    /// Skipped token span `[start, end)`.
    pub tokens: Range<u32>,
}

#[derive(Debug, Clone)]
pub struct ParseTree<'t> {
    tokens: &'t TokenStream,
    root_rule: RuleId,
    nodes: Vec<NodeData>,
    children: Vec<Element>,
    root: Element,
}

impl<'t> ParseTree<'t> {
    pub(crate) fn new(
        tokens: &'t TokenStream,
        root_rule: RuleId,
        nodes: Vec<NodeData>,
        children: Vec<Element>,
        root: Element,
    ) -> Self {
        Self {
            tokens,
            root_rule,
            nodes,
            children,
            root,
        }
    }

    /// The root node. Usually a rule node for [`root_rule`](Self::root_rule),
    /// but a collapsing root can be replaced by its only child.
    pub fn root(&self) -> Node<'_> {
        self.node(self.root)
    }

    /// The rule parsing started from.
    pub fn root_rule(&self) -> RuleId {
        self.root_rule
    }

    pub fn tokens(&self) -> &'t TokenStream {
        self.tokens
    }

    /// Number of rule nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no rule node, i.e. the root collapsed to a token.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, element: Element) -> Node<'_> {
        match element {
            Element::Rule(id) => Node::Rule(RuleNode { tree: self, id }),
            Element::Token(index) => Node::Token(TokenLeaf { tree: self, index }),
        }
    }

    /// Every rule node and token leaf in preorder.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Token leaves in source order.
    pub fn leaves(&self) -> impl Iterator<Item = TokenLeaf<'_>> {
        self.descendants().filter_map(|node| match node {
            Node::Token(leaf) => Some(leaf),
            Node::Rule(_) => None,
        })
    }

    /// Rule nodes of `rule`, in preorder.
    pub fn find_all(&self, rule: RuleId) -> impl Iterator<Item = RuleNode<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, data)| data.rule == rule)
            .map(move |(i, _)| RuleNode {
                tree: self,
                id: NodeId(i as u32),
            })
    }

    pub fn recovered_declarations(&self) -> Vec<RecoveredDeclaration> {
        self.find_all(RuleId::RecoveredDeclaration)
            .map(|node| RecoveredDeclaration {
                line: node.line(),
                tokens: node.token_range(),
            })
            .collect()
    }

    /// Rules serialize as their camelCase names, tokens with kind, text and
    /// position.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self.root())?)
    }

    pub fn printer(&self) -> TreePrinter<'_, 't> {
        TreePrinter::new(self)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Handle to a node of a [`ParseTree`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Rule(RuleNode<'a>),
    Token(TokenLeaf<'a>),
}

impl<'a> Node<'a> {
    /// `None` for token leaves.
    pub fn rule(&self) -> Option<RuleId> {
        match self {
            Node::Rule(node) => Some(node.rule()),
            Node::Token(_) => None,
        }
    }

    pub fn token_range(&self) -> Range<u32> {
        match self {
            Node::Rule(node) => node.token_range(),
            Node::Token(leaf) => leaf.index..leaf.index + 1,
        }
    }

    pub fn first_token(&self) -> Option<&'a Token> {
        match self {
            Node::Rule(node) => node.first_token(),
            Node::Token(leaf) => Some(leaf.token()),
        }
    }

    pub fn last_token(&self) -> Option<&'a Token> {
        match self {
            Node::Rule(node) => node.last_token(),
            Node::Token(leaf) => Some(leaf.token()),
        }
    }

    pub fn children(&self) -> Vec<Node<'a>> {
        match self {
            Node::Rule(node) => node.children().collect(),
            Node::Token(_) => Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Node::Rule(node) => node.text(),
            Node::Token(leaf) => leaf.text().to_owned(),
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Node::Rule(node) => node.line(),
            Node::Token(leaf) => leaf.token().line,
        }
    }

    pub fn as_rule(&self) -> Option<RuleNode<'a>> {
        match self {
            Node::Rule(node) => Some(*node),
            Node::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<TokenLeaf<'a>> {
        match self {
            Node::Token(leaf) => Some(*leaf),
            Node::Rule(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleNode<'a> {
    tree: &'a ParseTree<'a>,
    id: NodeId,
}

impl<'a> RuleNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn rule(&self) -> RuleId {
        self.tree.data(self.id).rule
    }

    pub fn token_range(&self) -> Range<u32> {
        self.tree.data(self.id).span.clone()
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        let range = tree.data(self.id).children.clone();
        tree.children[range.start as usize..range.end as usize]
            .iter()
            .map(move |&element| tree.node(element))
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    /// `None` only for an empty root.
    pub fn first_token(&self) -> Option<&'a Token> {
        let span = self.token_range();
        (!span.is_empty()).then(|| &self.tree.tokens[span.start])
    }

    pub fn last_token(&self) -> Option<&'a Token> {
        let span = self.token_range();
        (!span.is_empty()).then(|| &self.tree.tokens[span.end - 1])
    }

    /// Token texts joined by single spaces. End of input contributes nothing.
    pub fn text(&self) -> String {
        let span = self.token_range();
        let texts: Vec<&str> = (span.start..span.end)
            .map(|i| &self.tree.tokens[i])
            .filter(|token| !token.is_eof())
            .map(|token| token.text.as_str())
            .collect();
        texts.join(" ")
    }

    /// Line of the first token, or of the token at the node's position if it
    /// is empty.
    pub fn line(&self) -> u32 {
        self.tree.tokens[self.token_range().start].line
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenLeaf<'a> {
    tree: &'a ParseTree<'a>,
    index: u32,
}

impl<'a> TokenLeaf<'a> {
    /// Index in the token stream.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn token(&self) -> &'a Token {
        &self.tree.tokens[self.index]
    }

    pub fn kind(&self) -> TokenKind {
        self.token().kind
    }

    pub fn text(&self) -> &'a str {
        &self.token().text
    }
}

/// Preorder iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a ParseTree<'a>,
    stack: Vec<Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let element = self.stack.pop()?;
        if let Element::Rule(id) = element {
            let range = self.tree.data(id).children.clone();
            self.stack.extend(
                self.tree.children[range.start as usize..range.end as usize]
                    .iter()
                    .rev(),
            );
        }
        Some(self.tree.node(element))
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Rule(node) => {
                let children: Vec<Node<'_>> = node.children().collect();
                let mut s = serializer.serialize_struct("Rule", 3)?;
                s.serialize_field("rule", &node.rule())?;
                s.serialize_field("tokens", &node.token_range())?;
                s.serialize_field("children", &children)?;
                s.end()
            }
            Node::Token(leaf) => {
                let token = leaf.token();
                let mut s = serializer.serialize_struct("Token", 4)?;
                s.serialize_field("kind", &token.kind)?;
                s.serialize_field("text", &token.text)?;
                s.serialize_field("line", &token.line)?;
                s.serialize_field("column", &token.column)?;
                s.end()
            }
        }
    }
}
