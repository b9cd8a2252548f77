#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the cxxparse crates.
//!
//! Three layers:
//! - **Tokens**: the pre-tokenized input (`Token`, `TokenStream`, `Keyword`)
//! - **Rule registry**: one `RuleId` per grammar rule, stable and enumerable
//! - **Expressions**: the combinator tree (`Expr`) every rule body is built from
//!
//! Nothing here knows how to parse. The grammar graph, the engine and the
//! parse tree live in `cxxparse-lib`.

pub mod colors;
pub mod grammar;
mod keyword;
mod rule;
mod token;

pub use colors::Colors;
pub use grammar::{Expr, TokenMatch};
pub use keyword::Keyword;
pub use rule::RuleId;
pub use token::{InvalidTokenStream, Token, TokenKind, TokenStream};

#[cfg(test)]
mod token_tests;
