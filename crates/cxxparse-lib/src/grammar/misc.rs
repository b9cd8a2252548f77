//! Literals and Visual C++ attributed ATL.

use cxxparse_core::RuleId::*;
use cxxparse_core::{Keyword as Kw, first_of, one_or_more, seq};

use super::{CHARACTER, GrammarBuilder, NUMBER, STRING, any_token_but_not};

pub(super) fn define(b: &mut GrammarBuilder) {
    b.define(BooleanLiteral, first_of![Kw::True, Kw::False]);
    b.define(PointerLiteral, Kw::Nullptr);
    b.define(
        Literal,
        first_of![CHARACTER, STRING, NUMBER, BooleanLiteral, PointerLiteral],
    );

    b.define(VcAtlAttribute, seq!["[", one_or_more![any_token_but_not("]")], "]"]);
    b.define(VcAtlDeclaration, seq![VcAtlAttribute, ";"]);
}
