//! Builder macros for [`Expr`](crate::Expr) trees.
//!
//! Every argument goes through `Expr::from`, so rule ids, keywords, token kinds,
//! literal text and nested expressions mix freely:
//!
//! ```
//! use cxxparse_core::{Keyword, RuleId, opt, seq};
//!
//! let expr = seq![Keyword::If, "(", RuleId::Condition, ")", RuleId::Statement,
//!                 opt![Keyword::Else, RuleId::Statement]];
//! assert_eq!(expr.to_string(), r#""if" "(" condition ")" statement ("else" statement)?"#);
//! ```

#[macro_export]
macro_rules! seq {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::sequence([$($crate::grammar::Expr::from($item)),+])
    };
}

#[macro_export]
macro_rules! first_of {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::first_of([$($crate::grammar::Expr::from($item)),+])
    };
}

#[macro_export]
macro_rules! opt {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::optional($crate::seq![$($item),+])
    };
}

#[macro_export]
macro_rules! zero_or_more {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::zero_or_more($crate::seq![$($item),+])
    };
}

#[macro_export]
macro_rules! one_or_more {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::one_or_more($crate::seq![$($item),+])
    };
}

#[macro_export]
macro_rules! next {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::next($crate::seq![$($item),+])
    };
}

#[macro_export]
macro_rules! next_not {
    ($($item:expr),+ $(,)?) => {
        $crate::grammar::Expr::next_not($crate::seq![$($item),+])
    };
}
