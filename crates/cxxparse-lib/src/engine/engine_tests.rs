use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::any_token;
use cxxparse_core::{
    Keyword, RuleId, TokenKind, first_of, next, next_not, one_or_more, opt, seq, zero_or_more,
};

use crate::diagnostics::Expectation;
use crate::grammar::{CxxGrammar, GrammarBuilder};
use crate::test_utils::{check, cxx_grammar, dump, lex, with_big_stack};
use crate::{Error, GrammarKey, Language, Parser, lexer};

const NUMBER: TokenKind = TokenKind::Number;
const IDENTIFIER: TokenKind = TokenKind::Identifier;

fn tiny(define: impl FnOnce(&mut GrammarBuilder)) -> CxxGrammar {
    let mut b = GrammarBuilder::new();
    define(&mut b);
    CxxGrammar::from_rules(GrammarKey::default(), b).unwrap()
}

fn recognition_error(grammar: &CxxGrammar, root: RuleId, source: &str) -> String {
    let tokens = lex(source);
    match Parser::new(grammar, &tokens).root(root).parse() {
        Ok(_) => panic!("`{source}` should not parse"),
        Err(err) => err.to_string(),
    }
}

/// Arithmetic over numbers: `Expression` wraps a collapsing sum of literals.
fn sums() -> CxxGrammar {
    tiny(|b| {
        b.define(Expression, AdditiveExpression);
        b.define(AdditiveExpression, seq![Literal, zero_or_more!["+", Literal]])
            .collapse_single_child();
        b.define(Literal, NUMBER);
    })
}

#[test]
fn sequence_builds_one_node() {
    let g = tiny(|b| {
        b.define(Expression, seq![IDENTIFIER, "=", NUMBER]);
    });
    insta::assert_snapshot!(dump(&g, Expression, "x = 1"), @r#"
    expression
      Identifier "x"
      Punctuator "="
      Number "1"
    "#);
}

#[test]
fn sequence_restores_on_failure() {
    let g = tiny(|b| {
        b.define(Expression, first_of![seq!["a", "b"], seq!["a", "c"]]);
    });
    insta::assert_snapshot!(dump(&g, Expression, "a c"), @r#"
    expression
      Identifier "a"
      Identifier "c"
    "#);
}

#[test]
fn ordered_choice_commits_to_first_match() {
    let g = tiny(|b| {
        b.define(Expression, first_of!["a", seq!["a", "b"]]);
    });
    insta::assert_snapshot!(
        recognition_error(&g, Expression, "a b"),
        @"parser expected one of {end of input} at line 1, column 3"
    );
}

#[test]
fn collapse_single_child() {
    let g = sums();
    insta::assert_snapshot!(dump(&g, Expression, "1"), @r#"
    expression
      literal
        Number "1"
    "#);
    insta::assert_snapshot!(dump(&g, Expression, "1 + 2"), @r#"
    expression
      additiveExpression
        literal
          Number "1"
        Punctuator "+"
        literal
          Number "2"
    "#);
}

#[test]
fn collapsing_root_is_replaced_by_its_child() {
    let g = sums();
    let tokens = lex("7");
    let tree = Parser::new(&g, &tokens)
        .root(AdditiveExpression)
        .parse()
        .unwrap();

    assert_eq!(tree.root_rule(), AdditiveExpression);
    assert_eq!(tree.root().rule(), Some(Literal));
    assert_eq!(tree.len(), 1);
}

#[test]
fn root_can_collapse_to_a_token() {
    let g = tiny(|b| {
        b.define(Literal, NUMBER).collapse_single_child();
    });
    let tokens = lex("7");
    let tree = Parser::new(&g, &tokens).root(Literal).parse().unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.root().rule(), None);
    assert_eq!(tree.root().text(), "7");
    insta::assert_snapshot!(tree.printer().dump(), @r#"Number "7""#);
}

#[test]
fn zero_width_rule_leaves_no_node() {
    let g = tiny(|b| {
        b.define(Expression, seq![Condition, NUMBER]);
        b.define(Condition, zero_or_more![","]);
    });
    insta::assert_snapshot!(dump(&g, Expression, "1"), @r#"
    expression
      Number "1"
    "#);
    insta::assert_snapshot!(dump(&g, Expression, ", , 1"), @r#"
    expression
      condition
        Punctuator ","
        Punctuator ","
      Number "1"
    "#);
}

#[test]
fn zero_width_root_still_has_a_node() {
    let g = tiny(|b| {
        b.define(Condition, zero_or_more![","]);
    });
    let tokens = lex("");
    let tree = Parser::new(&g, &tokens).root(Condition).parse().unwrap();

    assert_eq!(tree.root().rule(), Some(Condition));
    assert_eq!(tree.root().children().len(), 0);
    assert_eq!(tree.root().token_range(), 0..0);
}

#[test]
fn root_may_consume_end_of_input() {
    let g = tiny(|b| {
        b.define(TranslationUnit, seq![zero_or_more![IDENTIFIER], TokenKind::Eof]);
    });
    let tokens = lex("a b");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    assert_eq!(tree.root().token_range(), 0..3);
    assert_eq!(tree.leaves().count(), 3);
    insta::assert_snapshot!(tree.printer().with_eof(true).dump(), @r#"
    translationUnit
      Identifier "a"
      Identifier "b"
      Eof ""
    "#);
}

#[test]
fn lookaheads_consume_nothing() {
    let g = tiny(|b| {
        b.define(Expression, seq![next!["a"], IDENTIFIER, next_not![NUMBER]]);
    });
    insta::assert_snapshot!(dump(&g, Expression, "a"), @r#"
    expression
      Identifier "a"
    "#);
    assert!(check(&g, Expression, "b").is_err());
    assert!(check(&g, Expression, "a 1").is_err());
}

#[test]
fn repetition_stops_without_progress() {
    let g = tiny(|b| {
        b.define(Expression, zero_or_more![opt!["a"]]);
        b.define(Condition, one_or_more![opt!["a"]]);
    });
    assert!(check(&g, Expression, "a a a").is_ok());
    assert!(check(&g, Condition, "").is_ok());
    assert!(check(&g, Condition, "b").is_err());
}

#[test]
fn any_token_stops_at_end_of_input() {
    let g = tiny(|b| {
        b.define(Expression, seq![any_token(), any_token(), any_token()]);
    });
    let tokens = lex("a b");
    let err = Parser::new(&g, &tokens).root(Expression).parse().unwrap_err();
    let Error::Recognition(err) = err else {
        panic!("expected a recognition error, got {err:?}");
    };

    assert_eq!(err.position, 2);
    assert_eq!(err.expected, vec![Expectation::AnyToken]);
    assert_eq!(err.found, "");
    insta::assert_snapshot!(err, @"parser expected one of {any token} at line 1, column 4");
}

#[test]
fn keyword_match_needs_keyword_token() {
    let g = tiny(|b| {
        b.define(Expression, Keyword::Class);
        b.define(Condition, "class");
    });

    let c = lexer::lex("class", Language::C);
    assert!(Parser::new(&g, &c).root(Expression).parse().is_err());
    assert!(Parser::new(&g, &c).root(Condition).parse().is_ok());

    let cxx = lexer::lex("class", Language::Cxx);
    assert!(Parser::new(&g, &cxx).root(Expression).parse().is_ok());
    assert!(Parser::new(&g, &cxx).root(Condition).parse().is_ok());
}

#[test]
fn rule_results_are_memoized() {
    let g = tiny(|b| {
        b.define(Expression, first_of![seq![Literal, "+"], seq![Literal, "-"]]);
        b.define(Literal, NUMBER);
    });
    let tokens = lex("1 -");
    let (_, stats) = Parser::new(&g, &tokens)
        .root(Expression)
        .parse_with_stats()
        .unwrap();

    assert_eq!(stats.rule_evaluations, 2);
    assert_eq!(stats.memo_hits, 1);
}

#[test]
fn failures_are_memoized() {
    let g = tiny(|b| {
        b.define(
            Expression,
            first_of![seq![Literal, "+"], seq![Literal, "-"], IDENTIFIER],
        );
        b.define(Literal, NUMBER);
    });
    let tokens = lex("x");
    let (_, stats) = Parser::new(&g, &tokens)
        .root(Expression)
        .parse_with_stats()
        .unwrap();

    assert_eq!(stats.rule_evaluations, 2);
    assert_eq!(stats.memo_hits, 1);
}

#[test]
fn evaluations_bounded_by_rules_times_positions() {
    let g = cxx_grammar();
    let source = indoc::indoc! {"
        template <class T>
        class Stack : public Base<T> {
        public:
            void push(const T& value) { items[size++] = value; }
            T pop() { return items[--size]; }
        private:
            T items[16];
            int size = 0;
        };
        int main() { Stack<int> s; s.push(a < b ? 1 : 2); return s.pop(); }
    "};
    let tokens = lex(source);
    let (_, stats) = Parser::new(&g, &tokens).parse_with_stats().unwrap();

    assert!(stats.rule_evaluations <= RuleId::COUNT * tokens.len());
    assert!(stats.memo_hits > 0);
}

#[test]
fn evaluations_grow_linearly_with_operators() {
    let g = cxx_grammar();
    let per_token: Vec<f64> = [100, 200, 400, 800]
        .into_iter()
        .map(|n| {
            let source = vec!["a"; n + 1].join(" + ");
            let tokens = lex(&source);
            let (_, stats) = Parser::new(&g, &tokens)
                .root(Expression)
                .parse_with_stats()
                .unwrap();
            stats.rule_evaluations as f64 / tokens.len() as f64
        })
        .collect();

    let first = per_token[0];
    for ratio in &per_token {
        assert!(
            (ratio - first).abs() < first * 0.1,
            "evaluations per token drifted: {per_token:?}"
        );
    }
}

#[test]
fn reparsing_gives_the_same_tree() {
    let g = cxx_grammar();
    let source = indoc::indoc! {"
        namespace n { template <class T> struct S { T v; }; }
        int x = a < b > c;
        S<S<int>> s;
        ) ]
        int main() { return f(1, 2) >> 3; }
    "};
    let tokens = lex(source);
    let first = Parser::new(&g, &tokens).parse().unwrap();
    let second = Parser::new(&g, &tokens).parse().unwrap();

    assert_eq!(first.printer().dump(), second.printer().dump());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_eq!(
        first.recovered_declarations(),
        second.recovered_declarations()
    );
    assert!(!first.recovered_declarations().is_empty());

    let relexed = lex(source);
    let third = Parser::new(&g, &relexed).parse().unwrap();
    assert_eq!(first.to_json().unwrap(), third.to_json().unwrap());
}

#[test]
fn furthest_failure_is_reported() {
    let g = tiny(|b| {
        b.define(Expression, first_of![seq!["a", "b", "c"], seq!["a", "d"]]);
    });
    let tokens = lex("a b x");
    let err = Parser::new(&g, &tokens).root(Expression).parse().unwrap_err();
    let Error::Recognition(err) = err else {
        panic!("expected a recognition error, got {err:?}");
    };

    assert_eq!(err.position, 2);
    assert_eq!(err.found, "x");
    assert_eq!(err.rule, Some(Expression));
    insta::assert_snapshot!(err, @r#"parser expected one of {"c"} at line 1, column 5"#);
}

#[test]
fn expectations_at_same_position_accumulate() {
    let g = tiny(|b| {
        b.define(Expression, seq!["a", first_of!["b", "c", NUMBER]]);
    });
    insta::assert_snapshot!(
        recognition_error(&g, Expression, "a x"),
        @r#"parser expected one of {"b", "c", NUMBER} at line 1, column 3"#
    );
}

#[test]
fn undefined_root() {
    let g = sums();
    let tokens = lex("1");
    let err = Parser::new(&g, &tokens).root(Statement).parse().unwrap_err();

    assert!(matches!(err, Error::UndefinedRoot(Statement)));
    insta::assert_snapshot!(err, @"rule `statement` has no definition in this grammar");
}

#[test]
fn recursion_limit() {
    let g = tiny(|b| {
        b.define(Expression, first_of![seq!["(", Expression, ")"], NUMBER]);
    });
    let parse = |source: &str, limit| {
        let tokens = lex(source);
        Parser::new(&g, &tokens)
            .root(Expression)
            .max_depth(limit)
            .parse()
            .map(|tree| tree.len())
    };

    assert_eq!(parse("((1))", Some(3)).unwrap(), 3);
    assert!(matches!(
        parse("(((1)))", Some(3)),
        Err(Error::RecursionLimitExceeded)
    ));
    assert_eq!(parse("(((1)))", None).unwrap(), 4);
}

#[test]
fn deep_nesting_hits_default_limit() {
    let result = with_big_stack(|| {
        let g = cxx_grammar();
        let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        let tokens = lex(&source);
        Parser::new(&g, &tokens)
            .root(Expression)
            .parse()
            .map(|_| ())
    });
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn moderate_nesting_parses() {
    let g = cxx_grammar();
    let tokens = lex("f(g(h(1 + (2 * (3 - x)))))");
    let tree = Parser::new(&g, &tokens).root(Expression).parse().unwrap();
    assert_eq!(tree.find_all(MultiplicativeExpression).count(), 1);
    assert_eq!(tree.find_all(AdditiveExpression).count(), 2);
}

#[test]
fn parses_are_independent() {
    let g = sums();
    let a = lex("1 + 2");
    let b = lex("3");
    let first = Parser::new(&g, &a).root(Expression).parse().unwrap();
    let second = Parser::new(&g, &b).root(Expression).parse().unwrap();

    assert_eq!(first.find_all(AdditiveExpression).count(), 1);
    assert_eq!(second.find_all(AdditiveExpression).count(), 0);
    assert_eq!(second.root().text(), "3");
}
