use std::collections::HashSet;
use std::sync::Arc;

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::{Expr, TokenMatch};
use cxxparse_core::{RuleId, seq};

use super::{CxxGrammar, EOF, GrammarBuilder, GrammarError};
use crate::{Configuration, Extensions, GrammarKey, Language};

fn reachable(grammar: &CxxGrammar, root: RuleId) -> HashSet<RuleId> {
    grammar.reachable_from(root).into_iter().collect()
}

#[test]
fn default_grammar_defines_every_rule() {
    let g = CxxGrammar::build(&GrammarKey::default()).unwrap();
    let missing: Vec<_> = RuleId::ALL
        .iter()
        .filter(|&&rule| g.rule(rule).is_none())
        .collect();
    assert!(missing.is_empty(), "undefined rules: {missing:?}");
    assert_eq!(g.rules().count(), RuleId::COUNT);
}

#[test]
fn every_key_builds() {
    for language in [Language::C, Language::Cxx] {
        for recovery in [false, true] {
            for extensions in [Extensions::NONE, Extensions::default()] {
                let key = Configuration::default()
                    .with_error_recovery(recovery)
                    .with_extensions(extensions)
                    .grammar_key(language);
                let g = CxxGrammar::build(&key).unwrap();
                assert_eq!(g.key(), &key);
            }
        }
    }
}

#[test]
fn undefined_reference() {
    let mut b = GrammarBuilder::new();
    b.define(TranslationUnit, seq![Declaration, EOF]);

    let err = CxxGrammar::from_rules(GrammarKey::default(), b).unwrap_err();
    assert_eq!(
        err,
        GrammarError::UndefinedRule {
            rule: Declaration,
            referenced_by: TranslationUnit,
        }
    );
    insta::assert_snapshot!(err, @"rule `declaration` is referenced by `translationUnit` but never defined");
}

#[test]
fn duplicate_definition() {
    let mut b = GrammarBuilder::new();
    b.define(Literal, ";");
    b.define(Literal, ",").collapse_single_child();

    let err = b.finish().unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule(Literal));
}

#[test]
fn first_definition_wins_flags() {
    let mut b = GrammarBuilder::new();
    b.define(Literal, ";").collapse_single_child();
    b.define(Condition, ";");

    let table = b.finish().unwrap();
    assert!(table[Literal.index()].as_ref().unwrap().collapse);
    assert!(!table[Condition.index()].as_ref().unwrap().collapse);
    assert!(table[Expression.index()].is_none());
}

#[test]
fn mock_replaces_rule_body() {
    let g = CxxGrammar::builder(&GrammarKey::default())
        .mock(Declaration)
        .build()
        .unwrap();

    let def = g.rule(Declaration).unwrap();
    assert_eq!(def.expr, Expr::Token(TokenMatch::Text("declaration")));
    assert!(!def.collapse);
}

#[test]
fn collapse_flags() {
    let g = CxxGrammar::build(&GrammarKey::default()).unwrap();
    for rule in [
        PrimaryExpression,
        PostfixExpression,
        CastExpression,
        AdditiveExpression,
        ConditionalExpression,
        AssignmentExpression,
    ] {
        assert!(g.rule(rule).unwrap().collapse, "{rule:?} should collapse");
    }
    for rule in [TranslationUnit, Expression, Literal, SimpleDeclaration] {
        assert!(!g.rule(rule).unwrap().collapse, "{rule:?} should not collapse");
    }
}

#[test]
fn disabled_dialects_are_unreachable() {
    let key = Configuration::default()
        .with_error_recovery(false)
        .with_extensions(Extensions::NONE)
        .grammar_key(Language::Cxx);
    let g = CxxGrammar::build(&key).unwrap();

    let dialect: Vec<_> = reachable(&g, TranslationUnit)
        .into_iter()
        .filter(|rule| rule.name().starts_with("cli") || rule.name().starts_with("vcAtl"))
        .collect();
    assert!(dialect.is_empty(), "reachable dialect rules: {dialect:?}");
}

#[test]
fn enabled_dialects_are_reachable() {
    let g = CxxGrammar::build(&GrammarKey::default()).unwrap();
    let rules = reachable(&g, TranslationUnit);
    for rule in [
        CliAttributes,
        CliPropertyDefinition,
        CliFinallyClause,
        VcAtlAttribute,
        VcAtlDeclaration,
    ] {
        assert!(rules.contains(&rule), "{rule:?} should be reachable");
    }
}

#[test]
fn recovery_rule_reachable_only_with_recovery() {
    let on = CxxGrammar::build(&GrammarKey::default()).unwrap();
    assert!(reachable(&on, TranslationUnit).contains(&RecoveredDeclaration));

    let key = Configuration::default()
        .with_error_recovery(false)
        .grammar_key(Language::Cxx);
    let off = CxxGrammar::build(&key).unwrap();
    assert!(off.rule(RecoveredDeclaration).is_some());
    assert!(!reachable(&off, TranslationUnit).contains(&RecoveredDeclaration));
}

#[test]
fn c_grammar_drops_managed_and_atl() {
    let key = Configuration::default().grammar_key(Language::C);
    assert!(key.extensions.gnu);
    assert!(!key.extensions.managed);
    assert!(!key.extensions.attributed_atl);

    let g = CxxGrammar::build(&key).unwrap();
    assert!(!reachable(&g, TranslationUnit).contains(&CliAttributes));
}

#[test]
fn cached_grammar_is_shared() {
    let key = GrammarKey::default();
    let a = CxxGrammar::cached(&key).unwrap();
    let b = CxxGrammar::cached(&key).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let strict = Configuration::default()
        .with_error_recovery(false)
        .grammar_key(Language::Cxx);
    let c = CxxGrammar::cached(&strict).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c.key(), &strict);
}

#[test]
fn cached_grammar_across_threads() {
    let key = Configuration::default()
        .with_extensions(Extensions::NONE)
        .grammar_key(Language::C);
    let grammars: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| CxxGrammar::cached(&key).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for g in &grammars[1..] {
        assert!(Arc::ptr_eq(&grammars[0], g));
    }
}
