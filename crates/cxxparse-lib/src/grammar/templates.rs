//! Templates.
//!
//! The lexer produces `>>` as one token, so a template argument list closed
//! by `>>` cannot end with a plain `>`. Every rule that can close such a list
//! has an `Inner*` twin that stops right before the `>>` instead, and the
//! outer rule consumes it.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, next, next_not, one_or_more, opt, seq, zero_or_more};

use super::{GrammarBuilder, IDENTIFIER};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    declarations(b);
    parameters(b);
    ids(b, ext);
    arguments(b);
}

fn declarations(b: &mut GrammarBuilder) {
    b.define(
        TemplateDeclaration,
        seq![Kw::Template, TemplateParameterListEnclosed, Declaration],
    );
    b.define(
        TemplateParameterListEnclosed,
        first_of![
            seq!["<", TemplateParameterList, ">"],
            seq![
                "<",
                zero_or_more![TemplateParameter, ","],
                InnerTypeParameter,
                ">>"
            ],
        ],
    );
    b.define(
        TypenameSpecifier,
        seq![
            Kw::Typename,
            NestedNameSpecifier,
            first_of![seq![opt![Kw::Template], SimpleTemplateId], IDENTIFIER],
        ],
    );
    b.define(
        ExplicitInstantiation,
        seq![opt![Kw::Extern], Kw::Template, Declaration],
    );
    b.define(
        ExplicitSpecialization,
        seq![Kw::Template, "<", ">", Declaration],
    );
}

fn parameters(b: &mut GrammarBuilder) {
    b.define(
        TemplateParameterList,
        seq![TemplateParameter, zero_or_more![",", TemplateParameter]],
    );
    // boost passes `typename` before a parameter whose type depends on
    // another argument
    b.define(
        TemplateParameter,
        first_of![
            seq![TypeParameter, next![first_of![",", ">"]]],
            seq![opt![Kw::Typename], ParameterDeclaration],
        ],
    );
    b.define(
        TypeParameter,
        first_of![
            seq![Kw::Class, opt![IDENTIFIER], "=", TypeId],
            seq![Kw::Class, opt!["..."], opt![IDENTIFIER]],
            seq![Kw::Typename, opt![IDENTIFIER], "=", TypeId],
            seq![Kw::Typename, opt!["..."], opt![IDENTIFIER]],
            seq![
                Kw::Template,
                TemplateParameterListEnclosed,
                Kw::Class,
                opt![IDENTIFIER],
                "=",
                IdExpression,
            ],
            seq![
                Kw::Template,
                TemplateParameterListEnclosed,
                Kw::Class,
                opt!["..."],
                opt![IDENTIFIER],
            ],
        ],
    );
    b.define(
        InnerTypeParameter,
        first_of![
            seq![Kw::Class, opt![IDENTIFIER], "=", InnerTypeId],
            seq![Kw::Typename, opt![IDENTIFIER], "=", InnerTypeId],
            seq![
                Kw::Template,
                TemplateParameterListEnclosed,
                Kw::Class,
                opt![IDENTIFIER],
                "=",
                InnerTypeId,
            ],
        ],
    );
}

fn ids(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        SimpleTemplateId,
        first_of![
            seq![TemplateName, "<", opt![TemplateArgumentList], ">"],
            seq![TemplateName, "<", InnerTemplateId, ">>"],
        ],
    );
    b.define(
        TemplateId,
        first_of![
            SimpleTemplateId,
            seq![OperatorFunctionId, "<", opt![TemplateArgumentList], ">"],
            seq![LiteralOperatorId, "<", opt![TemplateArgumentList], ">"],
            seq![OperatorFunctionId, "<", InnerTemplateId, ">>"],
            seq![LiteralOperatorId, "<", InnerTemplateId, ">>"],
        ],
    );
    b.define(TemplateName, IDENTIFIER);

    b.define(
        InnerTemplateId,
        seq![
            zero_or_more![
                next_not![InnerTypeId, ">>"],
                TemplateArgument,
                opt!["..."],
                ","
            ],
            InnerTypeId,
        ],
    );
    b.define(
        InnerTypeId,
        first_of![
            InnerTrailingTypeSpecifier,
            seq![one_or_more![TypeSpecifier], InnerTrailingTypeSpecifier],
            seq![
                TypeSpecifierSeq,
                opt![NoptrAbstractDeclarator],
                ParametersAndQualifiers,
                "->",
                InnerTrailingTypeSpecifier,
            ],
        ],
    );
    // Only the trailing type specifiers that can end with a template-id.
    b.define(
        InnerTrailingTypeSpecifier,
        first_of![
            seq![opt!["::"], opt![NestedNameSpecifier], InnerSimpleTemplateId],
            seq![
                opt!["::"],
                opt![NestedNameSpecifier],
                Kw::Template,
                InnerSimpleTemplateId
            ],
            seq![
                opt![gate(ext.managed, CliAttributes)],
                ClassKey,
                opt![NestedNameSpecifier],
                opt![Kw::Template],
                InnerSimpleTemplateId,
            ],
            seq![
                Kw::Typename,
                NestedNameSpecifier,
                Kw::Template,
                InnerSimpleTemplateId
            ],
        ],
    );
    b.define(
        InnerSimpleTemplateId,
        seq![TemplateName, "<", InnerTemplateArgumentList],
    );
}

fn arguments(b: &mut GrammarBuilder) {
    b.define(
        TemplateArgumentList,
        seq![
            TemplateArgument,
            opt!["..."],
            zero_or_more![",", TemplateArgument, opt!["..."]],
        ],
    );
    b.define(
        InnerTemplateArgumentList,
        seq![
            InnerTemplateArgument,
            opt!["..."],
            zero_or_more![",", InnerTemplateArgument, opt!["..."]],
        ],
    );

    // A constant expression alone would read `carray<int, 10>` as a relational
    // expression, so shift expressions are tried first.
    b.define(
        TemplateArgument,
        first_of![
            seq![TypeId, next![first_of![">", ",", "..."]]],
            seq![TypenameSpecifier, next![first_of![">", ",", "..."]]],
            seq![ShiftExpression, next![first_of![">", ","]]],
            seq![ConstantExpression, next![first_of![">", ","]]],
        ],
    );
    b.define(
        InnerTemplateArgument,
        first_of![
            seq![TypeId, next![first_of![">>", ",", "..."]]],
            seq![TypenameSpecifier, next![first_of![">>", ",", "..."]]],
            seq![AdditiveExpression, next![first_of![">>", ","]]],
            seq![ConstantExpression, next![first_of![">>", ","]]],
        ],
    );
}
