//! The C++ rule graph.
//!
//! A grammar is a table from [`RuleId`] to a rule body ([`Expr`]) plus a
//! collapse flag. Bodies refer to each other by id, so cycles are just ids.
//! Dialect features are resolved while building: a disabled alternative is
//! never part of the graph.
//!
//! Rules are split by area of the language, one module each. Every module
//! exposes a `define` function that registers its rules on the builder.

mod cache;
mod classes;
mod declarations;
mod declarators;
mod exceptions;
mod expressions;
mod managed;
mod misc;
mod statements;
mod templates;
mod toplevel;

#[cfg(test)]
mod builder_tests;

use indexmap::IndexMap;
use indexmap::map::Entry;

use cxxparse_core::grammar::{Expr, TokenMatch, any_token};
use cxxparse_core::{RuleId, TokenKind};

use crate::GrammarKey;

pub(super) const IDENTIFIER: TokenKind = TokenKind::Identifier;
pub(super) const STRING: TokenKind = TokenKind::String;
pub(super) const NUMBER: TokenKind = TokenKind::Number;
pub(super) const CHARACTER: TokenKind = TokenKind::Character;
pub(super) const EOF: TokenKind = TokenKind::Eof;

fn any_token_but_not(expr: impl Into<Expr>) -> Expr {
    Expr::sequence([Expr::next_not(expr.into()), any_token()])
}

/// Errors detected while building a grammar graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{rule}` is referenced by `{referenced_by}` but never defined")]
    UndefinedRule { rule: RuleId, referenced_by: RuleId },

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(RuleId),
}

/// Body of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub expr: Expr,
    /// Replace the rule's node by its only child when it has exactly one.
    pub collapse: bool,
}

/// Collects rule definitions and checks them once complete.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: IndexMap<RuleId, RuleDef>,
    duplicates: Vec<RuleId>,
}

/// Returned by [`GrammarBuilder::define`] to set per-rule flags.
pub struct RuleHandle<'b> {
    def: Option<&'b mut RuleDef>,
}

impl RuleHandle<'_> {
    pub fn collapse_single_child(self) {
        if let Some(def) = self.def {
            def.collapse = true;
        }
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the body of `rule`. A second definition of the same rule is
    /// reported by [`finish`](Self::finish).
    pub fn define(&mut self, rule: RuleId, expr: impl Into<Expr>) -> RuleHandle<'_> {
        let def = RuleDef {
            expr: expr.into(),
            collapse: false,
        };
        match self.rules.entry(rule) {
            Entry::Vacant(entry) => RuleHandle {
                def: Some(entry.insert(def)),
            },
            Entry::Occupied(_) => {
                self.duplicates.push(rule);
                RuleHandle { def: None }
            }
        }
    }

    /// Replaces the body of `rule` with a match of a single token spelled
    /// like the rule name, so tests can exercise one rule in isolation.
    pub fn mock(&mut self, rule: RuleId) {
        self.rules.insert(
            rule,
            RuleDef {
                expr: Expr::Token(TokenMatch::Text(rule.name())),
                collapse: false,
            },
        );
    }

    /// Checks that no rule is defined twice and that every reference
    /// resolves. Returns the table indexed by rule.
    pub fn finish(self) -> Result<Vec<Option<RuleDef>>, GrammarError> {
        if let Some(&rule) = self.duplicates.first() {
            return Err(GrammarError::DuplicateRule(rule));
        }

        for (&referenced_by, def) in &self.rules {
            if let Some(rule) = def
                .expr
                .references()
                .into_iter()
                .find(|r| !self.rules.contains_key(r))
            {
                return Err(GrammarError::UndefinedRule {
                    rule,
                    referenced_by,
                });
            }
        }

        let mut table: Vec<Option<RuleDef>> = vec![None; RuleId::COUNT];
        for (rule, def) in self.rules {
            table[rule.index()] = Some(def);
        }
        Ok(table)
    }
}

/// A complete, immutable C++ grammar graph for one [`GrammarKey`].
///
/// Building one walks a few hundred rule definitions; use
/// [`CxxGrammar::cached`] to share graphs across parses.
#[derive(Debug)]
pub struct CxxGrammar {
    key: GrammarKey,
    rules: Vec<Option<RuleDef>>,
}

impl CxxGrammar {
    pub fn build(key: &GrammarKey) -> Result<Self, GrammarError> {
        Self::builder(key).build()
    }

    /// Builder for a grammar with some rules replaced by mocks.
    pub fn builder(key: &GrammarKey) -> CxxGrammarBuilder {
        CxxGrammarBuilder {
            key: *key,
            mocks: Vec::new(),
        }
    }

    /// Wraps a hand-written rule table, e.g. a tiny grammar for tests.
    pub fn from_rules(key: GrammarKey, builder: GrammarBuilder) -> Result<Self, GrammarError> {
        Ok(Self {
            key,
            rules: builder.finish()?,
        })
    }

    /// Shared graph for `key`, built on first use.
    pub fn cached(key: &GrammarKey) -> Result<std::sync::Arc<Self>, GrammarError> {
        cache::get_or_build(key)
    }

    pub fn key(&self) -> &GrammarKey {
        &self.key
    }

    pub fn rule(&self, rule: RuleId) -> Option<&RuleDef> {
        self.rules[rule.index()].as_ref()
    }

    /// Defined rules in registry order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &RuleDef)> {
        RuleId::ALL
            .iter()
            .filter_map(|&rule| self.rule(rule).map(|def| (rule, def)))
    }

    /// Rules reachable from `root` through rule references, in registry order.
    pub fn reachable_from(&self, root: RuleId) -> Vec<RuleId> {
        let mut seen = vec![false; RuleId::COUNT];
        seen[root.index()] = true;
        let mut stack = vec![root];
        while let Some(rule) = stack.pop() {
            let Some(def) = self.rule(rule) else {
                continue;
            };
            for next in def.expr.references() {
                if !std::mem::replace(&mut seen[next.index()], true) {
                    stack.push(next);
                }
            }
        }
        RuleId::ALL
            .iter()
            .copied()
            .filter(|rule| seen[rule.index()])
            .collect()
    }
}

pub struct CxxGrammarBuilder {
    key: GrammarKey,
    mocks: Vec<RuleId>,
}

impl CxxGrammarBuilder {
    pub fn mock(mut self, rule: RuleId) -> Self {
        self.mocks.push(rule);
        self
    }

    pub fn build(self) -> Result<CxxGrammar, GrammarError> {
        let key = self.key;
        let ext = &key.extensions;
        let mut b = GrammarBuilder::new();

        misc::define(&mut b);
        toplevel::define(&mut b, key.error_recovery);
        expressions::define(&mut b, ext);
        statements::define(&mut b, ext);
        declarations::define(&mut b, ext);
        declarators::define(&mut b, ext);
        classes::define(&mut b, ext);
        managed::define(&mut b);
        templates::define(&mut b, ext);
        exceptions::define(&mut b, ext);

        for rule in self.mocks {
            b.mock(rule);
        }

        let grammar = CxxGrammar::from_rules(key, b)?;
        log::debug!(
            "built C++ grammar: {} rules, language {:?}, recovery {}, extensions {:?}",
            grammar.rules().count(),
            key.language,
            key.error_recovery,
            key.extensions,
        );
        Ok(grammar)
    }
}
