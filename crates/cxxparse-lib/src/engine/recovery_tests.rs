use cxxparse_core::RuleId::*;
use proptest::prelude::*;

use crate::test_utils::{cxx_grammar, lex, strict_grammar, with_big_stack};
use crate::{Error, Parser, RecoveredDeclaration};

const BROKEN: &str = "int a;\n) ) ]\nint b;\n";

#[test]
fn unreadable_declaration_is_skipped() {
    let g = cxx_grammar();
    let tokens = lex(BROKEN);
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    assert_eq!(
        tree.recovered_declarations(),
        vec![RecoveredDeclaration {
            line: 2,
            tokens: 3..6,
        }]
    );
    assert_eq!(tree.find_all(SimpleDeclaration).count(), 2);

    let recovered = tree.find_all(RecoveredDeclaration).next().unwrap();
    assert_eq!(recovered.text(), ") ) ]");
    assert_eq!(recovered.child_count(), 3);
}

#[test]
fn without_recovery_the_file_fails() {
    let g = strict_grammar();
    let tokens = lex(BROKEN);
    let err = Parser::new(&g, &tokens).parse().unwrap_err();
    let Error::Recognition(err) = err else {
        panic!("expected a recognition error, got {err:?}");
    };

    assert_eq!(err.position, 3);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 1);
    assert_eq!(err.found, ")");
    assert!(err.to_string().starts_with("parser expected one of {"));
    assert!(err.to_string().ends_with("} at line 2, column 1"));
}

#[test]
fn readable_file_has_no_recovered_declarations() {
    let g = cxx_grammar();
    let tokens = lex("int a;\nint b;\n");
    let tree = Parser::new(&g, &tokens).parse().unwrap();
    assert!(tree.recovered_declarations().is_empty());
}

#[test]
fn several_regions_are_skipped_independently() {
    let g = cxx_grammar();
    let source = "int a;\n) )\nint b;\n] ]\nint c;\n";
    let tokens = lex(source);
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    let lines: Vec<u32> = tree
        .recovered_declarations()
        .iter()
        .map(|r| r.line)
        .collect();
    assert_eq!(lines, [2, 4]);
    assert_eq!(tree.find_all(SimpleDeclaration).count(), 3);
}

#[test]
fn trailing_garbage_is_skipped() {
    let g = cxx_grammar();
    let tokens = lex("int a;\n) )");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    assert_eq!(
        tree.recovered_declarations(),
        vec![RecoveredDeclaration {
            line: 2,
            tokens: 3..5,
        }]
    );
}

#[test]
fn recovery_applies_at_top_level_only() {
    let g = cxx_grammar();
    let tokens = lex("void f() { ) }\nint b;\n");
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    // The whole function is unreadable, so it is skipped as one region.
    assert_eq!(tree.find_all(FunctionDefinition).count(), 0);
    assert_eq!(tree.recovered_declarations().len(), 1);
    assert_eq!(tree.find_all(SimpleDeclaration).count(), 1);
}

#[test]
fn recovered_node_sits_between_declarations() {
    let g = cxx_grammar();
    let tokens = lex(BROKEN);
    let tree = Parser::new(&g, &tokens).parse().unwrap();

    let root = tree.root().as_rule().unwrap();
    assert_eq!(root.rule(), TranslationUnit);

    // The translation unit also consumes end of input as its last leaf.
    let children: Vec<_> = root.children().collect();
    let rules: Vec<_> = children.iter().map(|child| child.rule()).collect();
    assert_eq!(
        rules,
        [
            Some(Declaration),
            Some(RecoveredDeclaration),
            Some(Declaration),
            None
        ]
    );
    assert_eq!(children[1].line(), 2);
    assert!(children[3].as_token().unwrap().token().is_eof());
}

fn nested_parens(depth: usize) -> String {
    format!(
        "int x = {}1{};\nint y;\n",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn too_deep_declaration_is_skipped() {
    let (recovered, declared) = with_big_stack(|| {
        let g = cxx_grammar();
        let tokens = lex(&nested_parens(80));
        let tree = Parser::new(&g, &tokens).parse().unwrap();
        let recovered = tree.recovered_declarations();
        let declared: Vec<String> = tree
            .find_all(SimpleDeclaration)
            .map(|decl| decl.text())
            .collect();
        (recovered, declared)
    });

    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].line, 1);
    assert_eq!(recovered[0].tokens.start, 0);
    assert_eq!(declared.last().map(String::as_str), Some("int y ;"));
}

#[test]
fn too_deep_declaration_parses_under_higher_limit() {
    let recovered = with_big_stack(|| {
        let g = cxx_grammar();
        let tokens = lex(&nested_parens(80));
        let tree = Parser::new(&g, &tokens)
            .max_depth(Some(5000))
            .parse()
            .unwrap();
        tree.recovered_declarations()
    });
    assert!(recovered.is_empty());
}

#[test]
fn too_deep_declaration_fails_without_recovery() {
    let result = with_big_stack(|| {
        let g = strict_grammar();
        let tokens = lex(&nested_parens(80));
        Parser::new(&g, &tokens).parse().map(|_| ())
    });
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

const SOUP: &[&str] = &[
    "int", "a", "b", ";", "(", ")", "{", "}", "[", "]", "<", ">", ">>", ",", "=", "1", "::",
    "*", "&", "~", "...", "class", "template", "typename", "\"s\"", "?", ":", "@",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn leaves_cover_any_token_soup(words in prop::collection::vec(prop::sample::select(SOUP), 0..24)) {
        let source = words.join(" ");
        let (leaves, len) = with_big_stack(move || {
            let g = cxx_grammar();
            let tokens = lex(&source);
            let tree = Parser::new(&g, &tokens).parse().unwrap();
            let leaves: Vec<u32> = tree.leaves().map(|leaf| leaf.index()).collect();
            (leaves, tokens.len() as u32)
        });
        prop_assert_eq!(leaves, (0..len).collect::<Vec<_>>());
    }
}
