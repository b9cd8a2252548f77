use cxxparse_core::RuleId::*;
use cxxparse_core::{Colors, TokenKind, seq, zero_or_more};
use rowan::NodeOrToken;
use serde_json::json;

use super::cst::{CstKind, SyntaxNode};
use super::{Element, Node};
use crate::grammar::{CxxGrammar, GrammarBuilder};
use crate::test_utils::{cxx_grammar, dump, lex};
use crate::{GrammarKey, Parser};

fn sums() -> CxxGrammar {
    let mut b = GrammarBuilder::new();
    b.define(Expression, AdditiveExpression);
    b.define(
        AdditiveExpression,
        seq![Literal, zero_or_more!["+", Literal]],
    )
    .collapse_single_child();
    b.define(Literal, TokenKind::Number);
    CxxGrammar::from_rules(GrammarKey::default(), b).unwrap()
}

#[test]
fn expression_tree() {
    let g = cxx_grammar();
    insta::assert_snapshot!(dump(&g, Expression, "a + b * c"), @r#"
    expression
      additiveExpression
        idExpression
          unqualifiedId
            Identifier "a"
        Punctuator "+"
        multiplicativeExpression
          idExpression
            unqualifiedId
              Identifier "b"
          Punctuator "*"
          idExpression
            unqualifiedId
              Identifier "c"
    "#);
}

#[test]
fn literal_collapses_through_expression_chain() {
    let g = cxx_grammar();
    insta::assert_snapshot!(dump(&g, AssignmentExpression, "42"), @r#"
    literal
      Number "42"
    "#);
}

#[test]
fn printer_spans() {
    let g = sums();
    let tokens = lex("1 +\n2");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();
    insta::assert_snapshot!(tree.printer().with_spans(true).dump(), @r#"
    expression [0..3]
      additiveExpression [0..3]
        literal [0..1]
          Number "1" 1:1
        Punctuator "+" 1:3
        literal [2..3]
          Number "2" 2:1
    "#);
}

#[test]
fn printer_colors() {
    let g = sums();
    let tokens = lex("1");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let plain = tree.printer().dump();
    let colored = tree.printer().colors(Colors::ON).dump();
    assert_ne!(plain, colored);
    assert!(colored.contains(Colors::ON.rule));
    assert!(!plain.contains('\x1b'));
}

#[test]
fn eof_leaf_is_hidden_by_default() {
    let g = cxx_grammar();
    let tokens = lex(";");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    assert!(!tree.printer().dump().contains("Eof"));
    assert!(tree.printer().with_eof(true).dump().contains(r#"Eof """#));
}

#[test]
fn navigation() {
    let g = sums();
    let tokens = lex("1 + 2 + 3");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let root = tree.root();
    assert_eq!(root.rule(), Some(Expression));
    assert_eq!(root.text(), "1 + 2 + 3");
    assert_eq!(root.line(), 1);

    let sum = root.children()[0].as_rule().unwrap();
    assert_eq!(sum.rule(), AdditiveExpression);
    assert_eq!(sum.child_count(), 5);
    assert_eq!(sum.first_token().unwrap().text, "1");
    assert_eq!(sum.last_token().unwrap().text, "3");

    let plus = sum.children().nth(1).unwrap().as_token().unwrap();
    assert_eq!(plus.index(), 1);
    assert_eq!(plus.kind(), TokenKind::Punctuator);
    assert_eq!(plus.text(), "+");
}

#[test]
fn descendants_in_preorder() {
    let g = sums();
    let tokens = lex("1 + 2");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let order: Vec<String> = tree
        .descendants()
        .map(|node| match node {
            Node::Rule(rule) => format!("{:?}", rule.rule()),
            Node::Token(leaf) => leaf.text().to_owned(),
        })
        .collect();
    assert_eq!(
        order,
        [
            "Expression",
            "AdditiveExpression",
            "Literal",
            "1",
            "+",
            "Literal",
            "2"
        ]
    );

    let leaves: Vec<_> = tree.leaves().map(|leaf| leaf.index()).collect();
    assert_eq!(leaves, [0, 1, 2]);
}

#[test]
fn nodes_are_stored_in_preorder() {
    let g = cxx_grammar();
    let tokens = lex("int a; int b;");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    let ids: Vec<usize> = tree
        .descendants()
        .filter_map(|node| node.as_rule())
        .map(|rule| rule.id().index())
        .collect();
    assert_eq!(ids, (0..tree.len()).collect::<Vec<_>>());
}

#[test]
fn abandoned_branches_are_dropped() {
    let g = cxx_grammar();
    let tokens = lex("a < b > c");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let reachable = tree.descendants().filter(|n| n.as_rule().is_some()).count();
    assert_eq!(tree.len(), reachable);
}

#[test]
fn node_by_element() {
    let g = sums();
    let tokens = lex("5");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let leaf = tree.node(Element::Token(0));
    assert_eq!(leaf.rule(), None);
    assert_eq!(leaf.text(), "5");
    assert!(leaf.children().is_empty());
    assert_eq!(leaf.token_range(), 0..1);
}

#[test]
fn json_shape() {
    let g = sums();
    let tokens = lex("1");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    assert_eq!(
        tree.to_json().unwrap(),
        json!({
            "rule": "expression",
            "tokens": { "start": 0, "end": 1 },
            "children": [{
                "rule": "literal",
                "tokens": { "start": 0, "end": 1 },
                "children": [
                    { "kind": "Number", "text": "1", "line": 1, "column": 1 }
                ]
            }]
        })
    );
}

#[test]
fn printer_and_json_agree_on_rule_names() {
    let g = cxx_grammar();
    let tokens = lex("int a;");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    let json = tree.to_json().unwrap();
    let dump = tree.printer().dump();
    let mut lines = dump.lines();
    assert_eq!(lines.next(), json["rule"].as_str());
    assert_eq!(lines.next().map(str::trim), json["children"][0]["rule"].as_str());
    assert_eq!(json["rule"], "translationUnit");
}

#[test]
fn cst_mirrors_tree() {
    let g = sums();
    let tokens = lex("1 + 2");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();

    let cst: SyntaxNode = tree.to_cst();
    assert_eq!(cst.kind(), CstKind::Rule(Expression));
    assert_eq!(cst.text().to_string(), "1+2");

    let sum = cst.first_child().unwrap();
    assert_eq!(sum.kind(), CstKind::Rule(AdditiveExpression));
    assert_eq!(sum.parent().unwrap().kind(), CstKind::Rule(Expression));

    let kinds: Vec<_> = sum.children_with_tokens().map(|el| el.kind()).collect();
    assert_eq!(
        kinds,
        [
            CstKind::Rule(Literal),
            CstKind::Token(TokenKind::Punctuator),
            CstKind::Rule(Literal),
        ]
    );

    let NodeOrToken::Token(plus) = sum.children_with_tokens().nth(1).unwrap() else {
        panic!("expected a token");
    };
    assert_eq!(plus.text(), "+");
}

#[test]
fn cst_wraps_token_root() {
    let mut b = GrammarBuilder::new();
    b.define(Literal, TokenKind::Number).collapse_single_child();
    let g = CxxGrammar::from_rules(GrammarKey::default(), b).unwrap();
    let tokens = lex("9");
    let tree = Parser::new(&g, &tokens).root(Literal).parse().unwrap();

    let cst = tree.to_cst();
    assert_eq!(cst.kind(), CstKind::Rule(Literal));
    assert_eq!(cst.text().to_string(), "9");
}

#[test]
fn cst_kind_raw_roundtrip() {
    use rowan::Language;

    use super::cst::CxxLang;

    for kind in [
        CstKind::Rule(TranslationUnit),
        CstKind::Rule(RecoveredDeclaration),
        CstKind::Token(TokenKind::Identifier),
        CstKind::Token(TokenKind::Eof),
    ] {
        assert_eq!(CxxLang::kind_from_raw(CxxLang::kind_to_raw(kind)), kind);
    }
}
