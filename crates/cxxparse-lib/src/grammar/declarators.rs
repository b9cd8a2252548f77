//! Declarators, parameters, function definitions and initializers.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, next_not, one_or_more, opt, seq, zero_or_more};

use super::{GrammarBuilder, IDENTIFIER};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    declarators(b, ext);
    abstract_declarators(b);
    parameters(b, ext);
    functions(b);
    initializers(b, ext);
}

fn declarators(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        InitDeclaratorList,
        seq![InitDeclarator, zero_or_more![",", InitDeclarator]],
    );
    b.define(InitDeclarator, seq![Declarator, opt![Initializer]]);

    b.define(
        Declarator,
        first_of![
            PtrDeclarator,
            seq![NoptrDeclarator, ParametersAndQualifiers, TrailingReturnType],
        ],
    );
    b.define(
        PtrDeclarator,
        first_of![seq![PtrOperator, PtrDeclarator], NoptrDeclarator],
    );
    b.define(
        NoptrDeclarator,
        seq![
            first_of![
                seq![DeclaratorId, opt![AttributeSpecifierSeq]],
                seq!["(", PtrDeclarator, ")"],
            ],
            zero_or_more![first_of![
                ParametersAndQualifiers,
                seq![
                    "[",
                    opt![ConstantExpression],
                    "]",
                    opt![AttributeSpecifierSeq]
                ],
            ]],
        ],
    );

    b.define(
        ParametersAndQualifiers,
        seq![
            "(",
            ParameterDeclarationClause,
            ")",
            opt![AttributeSpecifierSeq],
            opt![CvQualifierSeq],
            opt![gate(ext.managed, CliFunctionModifiers)],
            opt![RefQualifier],
            opt![TrailingReturnType],
            opt![ExceptionSpecification],
        ],
    );
    b.define(
        TrailingReturnType,
        seq![
            "->",
            one_or_more![TrailingTypeSpecifierSeq],
            opt![AbstractDeclarator]
        ],
    );

    // `^` is a handle and `%` a tracking reference in C++/CLI.
    b.define(
        PtrOperator,
        first_of![
            seq![
                "*",
                zero_or_more![first_of![AttributeSpecifierSeq, CvQualifierSeq]]
            ],
            seq!["&", zero_or_more![AttributeSpecifierSeq]],
            seq!["&&", zero_or_more![AttributeSpecifierSeq]],
            seq![
                NestedNameSpecifier,
                "*",
                zero_or_more![first_of![AttributeSpecifierSeq, CvQualifierSeq]],
            ],
            gate(
                ext.managed,
                seq!["^", opt![AttributeSpecifierSeq], opt![CvQualifierSeq]]
            ),
            gate(ext.managed, seq!["%", opt![AttributeSpecifierSeq]]),
        ],
    );

    b.define(CvQualifierSeq, one_or_more![CvQualifier]);
    b.define(CvQualifier, first_of![Kw::Const, Kw::Volatile]);
    b.define(RefQualifier, first_of!["&", "&&"]);

    b.define(
        DeclaratorId,
        first_of![
            seq![opt![NestedNameSpecifier], ClassName],
            seq![opt!["..."], IdExpression],
        ],
    );
}

fn abstract_declarators(b: &mut GrammarBuilder) {
    b.define(TypeId, seq![TypeSpecifierSeq, opt![AbstractDeclarator]]);

    b.define(
        AbstractDeclarator,
        first_of![
            PtrAbstractDeclarator,
            seq![
                opt![NoptrAbstractDeclarator],
                ParametersAndQualifiers,
                TrailingReturnType
            ],
            AbstractPackDeclarator,
        ],
    );
    b.define(
        PtrAbstractDeclarator,
        seq![zero_or_more![PtrOperator], opt![NoptrAbstractDeclarator]],
    );

    let suffixes = || {
        zero_or_more![first_of![
            ParametersAndQualifiers,
            seq![
                "[",
                opt![ConstantExpression],
                "]",
                opt![AttributeSpecifierSeq]
            ],
        ]]
    };
    b.define(
        NoptrAbstractDeclarator,
        seq![opt!["(", PtrAbstractDeclarator, ")"], suffixes()],
    );
    b.define(
        AbstractPackDeclarator,
        seq![zero_or_more![PtrOperator], NoptrAbstractPackDeclarator],
    );
    b.define(NoptrAbstractPackDeclarator, seq!["...", suffixes()]);
}

fn parameters(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        ParameterDeclarationClause,
        first_of![
            seq![ParameterDeclarationList, ",", "..."],
            seq![opt![ParameterDeclarationList], opt!["..."]],
            gate(ext.managed, CliParameterArray),
        ],
    );
    b.define(
        ParameterDeclarationList,
        seq![
            ParameterDeclaration,
            zero_or_more![",", ParameterDeclaration]
        ],
    );
    b.define(
        ParameterDeclaration,
        first_of![
            seq![
                opt![AttributeSpecifierSeq],
                opt![gate(ext.attributed_atl, VcAtlAttribute)],
                ParameterDeclSpecifierSeq,
                Declarator,
                opt!["=", InitializerClause],
            ],
            seq![
                opt![AttributeSpecifierSeq],
                ParameterDeclSpecifierSeq,
                opt![AbstractDeclarator],
                opt!["=", InitializerClause],
            ],
        ],
    );
    b.define(
        ParameterDeclSpecifierSeq,
        seq![
            zero_or_more![
                next_not![opt![Declarator], first_of!["=", ")", ","]],
                DeclSpecifier,
                opt!["..."],
            ],
            opt![AttributeSpecifierSeq],
        ],
    );
}

fn functions(b: &mut GrammarBuilder) {
    b.define(
        FunctionDefinition,
        seq![
            opt![AttributeSpecifierSeq],
            opt![FunctionDeclSpecifierSeq],
            Declarator,
            opt![VirtSpecifierSeq],
            FunctionBody,
        ],
    );
    b.define(
        FunctionDeclSpecifierSeq,
        one_or_more![
            next_not![Declarator, opt![VirtSpecifierSeq], FunctionBody],
            DeclSpecifier,
            opt![AttributeSpecifierSeq],
        ],
    );
    b.define(
        FunctionBody,
        first_of![
            seq![opt![CtorInitializer], CompoundStatement],
            FunctionTryBlock,
            seq!["=", Kw::Delete, ";"],
            seq!["=", Kw::Default, ";"],
        ],
    );
}

fn initializers(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        Initializer,
        first_of![seq!["(", ExpressionList, ")"], BraceOrEqualInitializer],
    );
    b.define(
        BraceOrEqualInitializer,
        first_of![seq!["=", InitializerClause], BracedInitList],
    );

    // C99 designators, plus the GNU `[a ... b] =` range form.
    b.define(
        InitializerClause,
        seq![
            opt![first_of![
                seq![".", IDENTIFIER, "="],
                gate(
                    ext.gnu,
                    seq!["[", ConstantExpression, "...", ConstantExpression, "]", "="]
                ),
                seq!["[", ConstantExpression, "]", "="],
            ]],
            first_of![AssignmentExpression, BracedInitList],
        ],
    );
    b.define(
        InitializerList,
        seq![
            InitializerClause,
            opt!["..."],
            zero_or_more![",", InitializerClause, opt!["..."]],
        ],
    );
    // `{,}` is not a valid braced list.
    b.define(
        BracedInitList,
        first_of![
            seq!["{", InitializerList, opt![","], "}"],
            seq!["{", "}"]
        ],
    );
}
