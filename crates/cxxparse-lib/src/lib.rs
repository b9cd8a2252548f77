//! cxxparse: grammar-driven packrat parser for C++.
//!
//! Handles ISO C++11 plus GNU extensions, C++/CLI and Microsoft attributed
//! ATL, and parses C files in a C-compatible mode.
//!
//! # Example
//!
//! ```
//! use cxxparse_lib::{Configuration, CxxGrammar, Language, Parser, lexer};
//!
//! let config = Configuration::default();
//! let grammar = CxxGrammar::cached(&config.grammar_key(Language::Cxx)).expect("grammar builds");
//! let tokens = lexer::lex("int main() { return 0; }", Language::Cxx);
//!
//! let tree = Parser::new(&grammar, &tokens).parse().expect("valid C++");
//! assert!(tree.recovered_declarations().is_empty());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod grammar;
pub mod lexer;
pub mod tree;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod test_utils;

pub use config::{Configuration, Extensions, GrammarKey, Language};
pub use cxxparse_core::{RuleId, Token, TokenKind, TokenStream};
pub use diagnostics::{Expectation, RecognitionError};
pub use engine::{ParseStats, Parser};
pub use grammar::{CxxGrammar, GrammarError};
pub use tree::{Node, ParseTree, RecoveredDeclaration};

/// Errors that can occur while building a grammar or parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The token stream is not derivable from the root rule.
    #[error("{0}")]
    Recognition(Box<RecognitionError>),

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("rule `{0}` has no definition in this grammar")]
    UndefinedRoot(RuleId),

    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("failed to serialize parse tree: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RecognitionError> for Error {
    fn from(err: RecognitionError) -> Self {
        Error::Recognition(Box::new(err))
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
