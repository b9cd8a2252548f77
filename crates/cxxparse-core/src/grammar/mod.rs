//! Combinator expressions that rule bodies are built from.
//!
//! An [`Expr`] is an immutable tree. Its leaves are token matches, the
//! any-token wildcard and references to other rules (by [`RuleId`](crate::RuleId)).
//! The `seq!`, `first_of!`, `opt!`, `zero_or_more!`, `one_or_more!`, `next!` and
//! `next_not!` macros build normalized trees from anything `Into<Expr>`.

mod expr;
mod macros;


pub use expr::{Expr, TokenMatch, any_token, gate};
