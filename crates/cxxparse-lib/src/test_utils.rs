//! Test utilities shared by the unit test modules.

use std::sync::Arc;

use crate::{
    Configuration, CxxGrammar, GrammarKey, Language, Parser, Result, RuleId, TokenStream, lexer,
};

/// The default C++ grammar (all dialects, recovery on), shared across tests.
pub(crate) fn cxx_grammar() -> Arc<CxxGrammar> {
    CxxGrammar::cached(&GrammarKey::default()).expect("default grammar builds")
}

/// The default C++ grammar with error recovery off, so a translation unit
/// only matches when every declaration is readable.
pub(crate) fn strict_grammar() -> Arc<CxxGrammar> {
    let key = Configuration::default()
        .with_error_recovery(false)
        .grammar_key(Language::Cxx);
    CxxGrammar::cached(&key).expect("strict grammar builds")
}

pub(crate) fn lex(source: &str) -> TokenStream {
    lexer::lex(source, Language::Cxx)
}

/// Parses `source` from `root` and discards the tree.
pub(crate) fn check(grammar: &CxxGrammar, root: RuleId, source: &str) -> Result<()> {
    let tokens = lexer::lex(source, grammar.key().language);
    Parser::new(grammar, &tokens).root(root).parse().map(|_| ())
}

/// Indented dump of the tree for `source` parsed from `root`.
#[track_caller]
pub(crate) fn dump(grammar: &CxxGrammar, root: RuleId, source: &str) -> String {
    let tokens = lexer::lex(source, grammar.key().language);
    match Parser::new(grammar, &tokens).root(root).parse() {
        Ok(tree) => tree.printer().dump(),
        Err(err) => panic!("`{source}` should parse as {root:?}: {err}"),
    }
}

#[track_caller]
pub(crate) fn assert_matches(grammar: &CxxGrammar, root: RuleId, source: &str) {
    if let Err(err) = check(grammar, root, source) {
        panic!("`{source}` should match {root:?}: {err}");
    }
}

#[track_caller]
pub(crate) fn assert_not_matches(grammar: &CxxGrammar, root: RuleId, source: &str) {
    if check(grammar, root, source).is_ok() {
        panic!("`{source}` should not match {root:?}");
    }
}

/// Runs `f` on a thread with a large stack. Deeply nested inputs recurse
/// further than the default test thread allows.
pub(crate) fn with_big_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(f)
        .expect("spawn test thread")
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}
