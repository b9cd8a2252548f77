//! Packrat parsing engine.
//!
//! Interprets a [`CxxGrammar`] over a [`TokenStream`]:
//! - `Sequence` runs left to right and restores on failure
//! - `FirstOf` commits to the first alternative that matches
//! - repetitions are greedy and stop on an iteration that consumes nothing
//! - lookaheads consume nothing and never produce nodes
//!
//! Every `(rule, position)` outcome is memoized, so no rule is evaluated twice
//! at the same position and backtracking stays linear in practice.
//!
//! Nodes are built into an arena as rules match. Nodes of abandoned branches
//! stay in the arena (the memo table may still hand them out) and are dropped
//! when the final tree is copied out in preorder.

mod memo;

#[cfg(test)]
mod engine_tests;
#[cfg(test)]
mod recovery_tests;

use indexmap::IndexSet;

use cxxparse_core::grammar::{Expr, TokenMatch};
use cxxparse_core::{RuleId, TokenStream};

use crate::diagnostics::{Expectation, RecognitionError};
use crate::grammar::CxxGrammar;
use crate::tree::{Element, NodeData, NodeId, ParseTree};
use crate::{Error, Result};

use memo::{Memo, MemoTable};

const DEFAULT_RECURSION_LIMIT: u32 = 1000;

/// Counters collected during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Rule bodies evaluated (memo misses).
    pub rule_evaluations: usize,
    /// Rule invocations answered from the memo table.
    pub memo_hits: usize,
}

/// One parse of one token stream.
///
/// ```
/// # use cxxparse_lib::{CxxGrammar, GrammarKey, Language, Parser, RuleId, lexer};
/// let grammar = CxxGrammar::build(&GrammarKey::default()).unwrap();
/// let tokens = lexer::lex("a + b * c", Language::Cxx);
/// let tree = Parser::new(&grammar, &tokens)
///     .root(RuleId::Expression)
///     .parse()
///     .unwrap();
/// assert_eq!(tree.find_all(RuleId::MultiplicativeExpression).count(), 1);
/// ```
pub struct Parser<'g, 't> {
    grammar: &'g CxxGrammar,
    tokens: &'t TokenStream,
    root: RuleId,
    max_depth: Option<u32>,
}

impl<'g, 't> Parser<'g, 't> {
    pub fn new(grammar: &'g CxxGrammar, tokens: &'t TokenStream) -> Self {
        Self {
            grammar,
            tokens,
            root: RuleId::TranslationUnit,
            max_depth: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    pub fn root(mut self, rule: RuleId) -> Self {
        self.root = rule;
        self
    }

    /// Limit on nested rule invocations. None = unlimited.
    ///
    /// Parsing a translation unit with error recovery on, a declaration that
    /// nests deeper than this is skipped as a recovered declaration. Any other
    /// parse fails with [`Error::RecursionLimitExceeded`].
    pub fn max_depth(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn parse(self) -> Result<ParseTree<'t>> {
        self.parse_with_stats().map(|(tree, _)| tree)
    }

    pub fn parse_with_stats(self) -> Result<(ParseTree<'t>, ParseStats)> {
        let Some(def) = self.grammar.rule(self.root) else {
            return Err(Error::UndefinedRoot(self.root));
        };

        let mut run = Run::new(self.grammar, self.tokens, self.max_depth);
        run.skip_too_deep =
            self.grammar.key().error_recovery && self.root == RuleId::TranslationUnit;
        run.rule_stack.push(self.root);
        run.stats.rule_evaluations += 1;
        let result = run.eval(&def.expr, 0);
        run.rule_stack.pop();

        if let Some(err) = run.fatal_error.take() {
            return Err(err);
        }

        let eof = self.tokens.eof_index();
        let root = match result {
            Some(end) if end == eof || end == eof + 1 => {
                run.finish_node(self.root, def.collapse, 0, end, 0, true)
            }
            _ if run.too_deep > 0 => return Err(Error::RecursionLimitExceeded),
            Some(end) => {
                run.expect(end, Expectation::EndOfInput);
                return Err(run.recognition_error().into());
            }
            None => return Err(run.recognition_error().into()),
        };
        // The root always yields an element.
        let root = root.unwrap_or(Element::Token(eof));

        let stats = run.stats;
        if run.too_deep > 0 {
            log::debug!(
                "recursion limit reached {} times, nested declarations were skipped",
                run.too_deep
            );
        }
        log::debug!(
            "parsed {} tokens from `{}`: {} rule evaluations, {} memo hits, {} memo entries",
            self.tokens.len(),
            self.root,
            stats.rule_evaluations,
            stats.memo_hits,
            run.memo.len(),
        );

        let tree = run.into_tree(self.root, root);
        for recovered in tree.recovered_declarations() {
            log::debug!(
                "skipped unreadable declaration at line {} ({} tokens)",
                recovered.line,
                recovered.tokens.len()
            );
        }
        Ok((tree, stats))
    }
}

/// Furthest position a token match was attempted at, and what was expected.
#[derive(Debug, Default)]
struct Furthest {
    pos: u32,
    expected: IndexSet<Expectation>,
    rule: Option<RuleId>,
}

struct Run<'g, 't> {
    grammar: &'g CxxGrammar,
    tokens: &'t TokenStream,
    memo: MemoTable,
    nodes: Vec<NodeData>,
    children: Vec<Element>,
    /// Elements produced by the rules being evaluated, innermost last.
    scratch: Vec<Element>,
    rule_stack: Vec<RuleId>,
    max_depth: Option<u32>,
    furthest: Furthest,
    stats: ParseStats,
    /// Fatal error that stops parsing (recursion limit).
    fatal_error: Option<Error>,
    /// Hitting the recursion limit fails the rule instead of the parse, so
    /// top-level recovery can skip the declaration.
    skip_too_deep: bool,
    too_deep: usize,
}

impl<'g, 't> Run<'g, 't> {
    fn new(grammar: &'g CxxGrammar, tokens: &'t TokenStream, max_depth: Option<u32>) -> Self {
        Self {
            grammar,
            tokens,
            memo: MemoTable::default(),
            nodes: Vec::new(),
            children: Vec::new(),
            scratch: Vec::with_capacity(64),
            rule_stack: Vec::with_capacity(64),
            max_depth,
            furthest: Furthest::default(),
            stats: ParseStats::default(),
            fatal_error: None,
            skip_too_deep: false,
            too_deep: 0,
        }
    }

    /// Matches `expr` at `pos`. On success returns the end position and
    /// leaves the produced elements on `scratch`; on failure `scratch` is as
    /// it was.
    fn eval(&mut self, expr: &'g Expr, pos: u32) -> Option<u32> {
        if self.fatal_error.is_some() {
            return None;
        }

        match expr {
            Expr::Token(m) => self.match_token(m, pos),
            Expr::AnyToken => match self.tokens.get(pos) {
                Some(token) if !token.is_eof() => {
                    self.scratch.push(Element::Token(pos));
                    Some(pos + 1)
                }
                _ => {
                    self.expect(pos, Expectation::AnyToken);
                    None
                }
            },
            Expr::Rule(rule) => {
                let (end, element) = self.invoke(*rule, pos)?;
                self.scratch.extend(element);
                Some(end)
            }
            Expr::Sequence(items) => {
                let mark = self.scratch.len();
                let mut cur = pos;
                for item in items {
                    match self.eval(item, cur) {
                        Some(end) => cur = end,
                        None => {
                            self.scratch.truncate(mark);
                            return None;
                        }
                    }
                }
                Some(cur)
            }
            Expr::FirstOf(alternatives) => alternatives.iter().find_map(|alt| self.eval(alt, pos)),
            Expr::Optional(inner) => Some(self.eval(inner, pos).unwrap_or(pos)),
            Expr::ZeroOrMore(inner) => Some(self.repeat(inner, pos)),
            Expr::OneOrMore(inner) => {
                let first = self.eval(inner, pos)?;
                if first == pos {
                    return Some(pos);
                }
                Some(self.repeat(inner, first))
            }
            Expr::Next(inner) => {
                let mark = self.scratch.len();
                let matched = self.eval(inner, pos).is_some();
                self.scratch.truncate(mark);
                matched.then_some(pos)
            }
            Expr::NextNot(inner) => {
                let mark = self.scratch.len();
                let matched = self.eval(inner, pos).is_some();
                self.scratch.truncate(mark);
                (!matched).then_some(pos)
            }
            Expr::Epsilon => Some(pos),
            Expr::Never => None,
        }
    }

    fn repeat(&mut self, inner: &'g Expr, pos: u32) -> u32 {
        let mut cur = pos;
        while let Some(end) = self.eval(inner, cur) {
            if end == cur {
                break;
            }
            cur = end;
        }
        cur
    }

    fn match_token(&mut self, m: &TokenMatch, pos: u32) -> Option<u32> {
        let token = self.tokens.get(pos)?;
        if m.matches(token) {
            self.scratch.push(Element::Token(pos));
            Some(pos + 1)
        } else {
            self.expect(pos, Expectation::Token(*m));
            None
        }
    }

    fn invoke(&mut self, rule: RuleId, pos: u32) -> Option<(u32, Option<Element>)> {
        if let Some(memo) = self.memo.get(rule, pos) {
            self.stats.memo_hits += 1;
            return match memo {
                Memo::Matched { end, element } => Some((end, element)),
                Memo::Failed => None,
            };
        }

        if let Some(limit) = self.max_depth
            && self.rule_stack.len() as u32 >= limit
        {
            if self.skip_too_deep {
                self.too_deep += 1;
            } else {
                self.fatal_error.get_or_insert(Error::RecursionLimitExceeded);
            }
            return None;
        }

        // References are checked when the grammar is built.
        let def = self.grammar.rule(rule)?;
        self.stats.rule_evaluations += 1;
        self.rule_stack.push(rule);
        let mark = self.scratch.len();
        let result = self.eval(&def.expr, pos);
        self.rule_stack.pop();

        let memo = match result {
            Some(end) => Memo::Matched {
                end,
                element: self.finish_node(rule, def.collapse, pos, end, mark, false),
            },
            None => Memo::Failed,
        };
        self.memo.insert(rule, pos, memo);

        match memo {
            Memo::Matched { end, element } => Some((end, element)),
            Memo::Failed => None,
        }
    }

    /// Turns the elements on `scratch` above `mark` into the rule's result.
    fn finish_node(
        &mut self,
        rule: RuleId,
        collapse: bool,
        start: u32,
        end: u32,
        mark: usize,
        is_root: bool,
    ) -> Option<Element> {
        if start == end && !is_root {
            self.scratch.truncate(mark);
            return None;
        }
        if collapse && self.scratch.len() == mark + 1 {
            return self.scratch.pop();
        }

        let first_child = self.children.len() as u32;
        self.children.extend(self.scratch.drain(mark..));
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            rule,
            span: start..end,
            children: first_child..self.children.len() as u32,
        });
        Some(Element::Rule(id))
    }

    fn expect(&mut self, pos: u32, expectation: Expectation) {
        let furthest = &mut self.furthest;
        if pos > furthest.pos || (furthest.expected.is_empty() && furthest.rule.is_none()) {
            furthest.pos = pos;
            furthest.expected.clear();
            furthest.rule = self.rule_stack.last().copied();
        }
        if pos == furthest.pos {
            furthest.expected.insert(expectation);
        }
    }

    fn recognition_error(&mut self) -> RecognitionError {
        let furthest = std::mem::take(&mut self.furthest);
        let pos = furthest.pos.min(self.tokens.eof_index());
        RecognitionError::at(
            pos,
            &self.tokens[pos],
            furthest.expected.into_iter().collect(),
            furthest.rule,
        )
    }

    /// Copies the nodes reachable from `root` into a fresh tree, in preorder.
    fn into_tree(self, root_rule: RuleId, root: Element) -> ParseTree<'t> {
        let mut compact = Compactor {
            old_nodes: &self.nodes,
            old_children: &self.children,
            nodes: Vec::new(),
            children: Vec::new(),
        };
        let root = compact.copy(root);
        ParseTree::new(
            self.tokens,
            root_rule,
            compact.nodes,
            compact.children,
            root,
        )
    }
}

struct Compactor<'a> {
    old_nodes: &'a [NodeData],
    old_children: &'a [Element],
    nodes: Vec<NodeData>,
    children: Vec<Element>,
}

impl Compactor<'_> {
    fn copy(&mut self, element: Element) -> Element {
        let Element::Rule(old) = element else {
            return element;
        };
        let data = &self.old_nodes[old.index()];
        let id = NodeId(self.nodes.len() as u32);
        let old_range = data.children.start as usize..data.children.end as usize;
        let first_child = self.children.len();
        self.nodes.push(NodeData {
            rule: data.rule,
            span: data.span.clone(),
            children: first_child as u32..(first_child + old_range.len()) as u32,
        });
        self.children
            .extend_from_slice(&self.old_children[old_range.clone()]);
        for (slot, i) in (first_child..).zip(old_range) {
            let child = self.copy(self.old_children[i]);
            self.children[slot] = child;
        }
        Element::Rule(id)
    }
}
