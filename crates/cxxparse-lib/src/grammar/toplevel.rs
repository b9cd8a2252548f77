//! Translation unit and declaration-level error recovery.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::any_token;
use cxxparse_core::{first_of, next_not, one_or_more, seq, zero_or_more};

use super::{EOF, GrammarBuilder};

/// With recovery on, a run of tokens that does not start a declaration is
/// absorbed into a `RecoveredDeclaration` node and parsing goes on. The rule
/// is defined either way; with recovery off nothing references it.
pub(super) fn define(b: &mut GrammarBuilder, error_recovery: bool) {
    if error_recovery {
        b.define(
            TranslationUnit,
            seq![
                zero_or_more![first_of![Declaration, RecoveredDeclaration]],
                EOF
            ],
        );
    } else {
        b.define(TranslationUnit, seq![zero_or_more![Declaration], EOF]);
    }

    b.define(
        RecoveredDeclaration,
        one_or_more![next_not![first_of![Declaration, EOF]], any_token()],
    );
}
