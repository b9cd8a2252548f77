//! Exception handling and exception specifications.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, one_or_more, opt, seq, zero_or_more};

use super::GrammarBuilder;
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    let finally = || gate(ext.managed, CliFinallyClause);

    b.define(
        TryBlock,
        first_of![
            seq![Kw::Try, CompoundStatement, HandlerSeq, finally()],
            seq![Kw::Try, CompoundStatement, HandlerSeq],
            seq![Kw::Try, CompoundStatement, finally()],
        ],
    );
    b.define(
        FunctionTryBlock,
        first_of![
            seq![
                Kw::Try,
                opt![CtorInitializer],
                CompoundStatement,
                HandlerSeq,
                finally()
            ],
            seq![Kw::Try, opt![CtorInitializer], CompoundStatement, HandlerSeq],
            seq![Kw::Try, opt![CtorInitializer], CompoundStatement, finally()],
        ],
    );
    b.define(HandlerSeq, one_or_more![Handler]);
    b.define(CliFinallyClause, seq!["finally", CompoundStatement]);
    b.define(
        Handler,
        seq![
            Kw::Catch,
            "(",
            ExceptionDeclaration,
            ")",
            CompoundStatement
        ],
    );
    b.define(
        ExceptionDeclaration,
        first_of![
            seq![
                opt![AttributeSpecifierSeq],
                TypeSpecifierSeq,
                first_of![Declarator, opt![AbstractDeclarator]],
            ],
            "...",
        ],
    );

    b.define(ThrowExpression, seq![Kw::Throw, opt![AssignmentExpression]]);

    b.define(
        ExceptionSpecification,
        first_of![DynamicExceptionSpecification, NoexceptSpecification],
    );
    b.define(
        DynamicExceptionSpecification,
        seq![Kw::Throw, "(", opt![TypeIdList], ")"],
    );
    b.define(
        TypeIdList,
        seq![
            TypeId,
            opt!["..."],
            zero_or_more![",", TypeId, opt!["..."]]
        ],
    );
    b.define(
        NoexceptSpecification,
        seq![Kw::Noexcept, opt!["(", ConstantExpression, ")"]],
    );
}
