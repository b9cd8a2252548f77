//! Expressions: primary expressions through assignment, lambdas, casts,
//! `new`/`delete`.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, next, opt, seq, zero_or_more};

use super::{EOF, GrammarBuilder, IDENTIFIER};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    primary(b, ext);
    postfix(b);
    unary(b);
    binary(b, ext);
}

fn primary(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        PrimaryExpression,
        first_of![
            Literal,
            Kw::This,
            ParExpression,
            IdExpression,
            LambdaExpression,
            // statement expression
            gate(ext.gnu, seq!["(", CompoundStatement, ")"]),
        ],
    )
    .collapse_single_child();

    b.define(ParExpression, seq!["(", Expression, ")"]);

    b.define(IdExpression, first_of![QualifiedId, UnqualifiedId]);

    // A template-id only counts when something that cannot continue a
    // relational expression follows it; `a < b > c` stays two comparisons.
    b.define(
        UnqualifiedId,
        first_of![
            seq![
                TemplateId,
                next![first_of![
                    "(", ")", "[", "]", "?", ":", BinaryOperator, ",", ";", EOF
                ]],
            ],
            IDENTIFIER,
            OperatorFunctionId,
            ConversionFunctionId,
            LiteralOperatorId,
            seq!["~", ClassName],
            seq!["~", DecltypeSpecifier],
            seq!["!", ClassName],
            gate(ext.managed, CliGenericId),
            Kw::Default,
        ],
    );

    b.define(
        QualifiedId,
        first_of![
            seq![NestedNameSpecifier, opt![Kw::Template], UnqualifiedId],
            seq!["::", IDENTIFIER],
            seq!["::", OperatorFunctionId],
            seq!["::", LiteralOperatorId],
            seq![
                "::",
                TemplateId,
                next![first_of![OverloadableOperator, ";"]]
            ],
        ],
    );

    b.define(
        NestedNameSpecifier,
        seq![
            first_of![
                seq![opt!["::"], TypeName, "::"],
                seq![opt!["::"], NamespaceName, "::"],
                seq![DecltypeSpecifier, "::"],
            ],
            zero_or_more![first_of![
                seq![IDENTIFIER, "::"],
                seq![opt![Kw::Template], SimpleTemplateId, "::"],
            ]],
        ],
    );

    b.define(
        LambdaExpression,
        seq![LambdaIntroducer, opt![LambdaDeclarator], CompoundStatement],
    );
    b.define(LambdaIntroducer, seq!["[", opt![LambdaCapture], "]"]);
    b.define(
        LambdaCapture,
        first_of![
            seq![CaptureDefault, ",", CaptureList],
            CaptureList,
            CaptureDefault,
        ],
    );
    b.define(CaptureDefault, first_of!["&", "="]);
    b.define(
        CaptureList,
        seq![
            Capture,
            opt!["..."],
            zero_or_more![",", Capture, opt!["..."]],
        ],
    );
    b.define(Capture, first_of![Expression, seq!["&", Expression]]);
    b.define(
        LambdaDeclarator,
        seq![
            "(",
            ParameterDeclarationClause,
            ")",
            opt![Kw::Mutable],
            opt![ExceptionSpecification],
            opt![AttributeSpecifierSeq],
            opt![TrailingReturnType],
        ],
    );
}

fn postfix(b: &mut GrammarBuilder) {
    b.define(
        PostfixExpression,
        seq![
            first_of![
                seq![SimpleTypeSpecifier, "(", opt![ExpressionList], ")"],
                seq![SimpleTypeSpecifier, BracedInitList],
                seq![TypenameSpecifier, "(", opt![ExpressionList], ")"],
                seq![TypenameSpecifier, BracedInitList],
                PrimaryExpression,
                seq![Kw::DynamicCast, TypeIdEnclosed, "(", Expression, ")"],
                seq![Kw::StaticCast, TypeIdEnclosed, "(", Expression, ")"],
                seq![Kw::ReinterpretCast, TypeIdEnclosed, "(", Expression, ")"],
                seq![Kw::ConstCast, TypeIdEnclosed, "(", Expression, ")"],
                seq![Kw::Typeid, "(", Expression, ")"],
                seq![Kw::Typeid, "(", TypeId, ")"],
            ],
            zero_or_more![first_of![
                seq!["[", Expression, "]"],
                seq!["(", opt![ExpressionList], ")"],
                seq![
                    first_of![".", "->"],
                    first_of![seq![opt![Kw::Template], IdExpression], PseudoDestructorName],
                ],
                "++",
                "--",
            ]],
        ],
    )
    .collapse_single_child();

    b.define(
        TypeIdEnclosed,
        first_of![seq!["<", TypeId, ">"], seq!["<", InnerTypeId, ">>"]],
    );

    b.define(ExpressionList, InitializerList);

    b.define(
        PseudoDestructorName,
        first_of![
            seq![opt![NestedNameSpecifier], TypeName, "::", "~", TypeName],
            seq![
                NestedNameSpecifier,
                Kw::Template,
                SimpleTemplateId,
                "::",
                "~",
                TypeName
            ],
            seq![opt![NestedNameSpecifier], "~", TypeName],
            seq!["~", DecltypeSpecifier],
        ],
    );
}

fn unary(b: &mut GrammarBuilder) {
    b.define(
        UnaryExpression,
        first_of![
            seq![UnaryOperator, CastExpression],
            PostfixExpression,
            seq!["++", CastExpression],
            seq!["--", CastExpression],
            seq![Kw::Sizeof, UnaryExpression],
            seq![Kw::Sizeof, "(", TypeId, ")"],
            seq![Kw::Sizeof, "...", "(", IDENTIFIER, ")"],
            seq![Kw::Alignof, "(", TypeId, ")"],
            NoexceptExpression,
            NewExpression,
            DeleteExpression,
        ],
    )
    .collapse_single_child();

    b.define(UnaryOperator, first_of!["*", "&", "+", "-", "!", "~"]);

    b.define(
        BinaryOperator,
        first_of![
            "||", "&&", "&", "|", "^", "==", "!=", "<=", "<", ">=", ">", "<<", ">>", "*", "/",
            "+", "-", AssignmentOperator
        ],
    );

    let new_keyword = || first_of![Kw::New, Kw::Gcnew];
    b.define(
        NewExpression,
        first_of![
            seq![
                opt!["::"],
                new_keyword(),
                opt![NewPlacement],
                NewTypeId,
                opt![NewInitializer]
            ],
            seq![
                opt!["::"],
                new_keyword(),
                NewPlacement,
                "(",
                TypeId,
                ")",
                opt![NewInitializer]
            ],
            seq![
                opt!["::"],
                new_keyword(),
                "(",
                TypeId,
                ")",
                opt![NewInitializer]
            ],
        ],
    );
    b.define(NewPlacement, seq!["(", ExpressionList, ")"]);
    b.define(NewTypeId, seq![TypeSpecifierSeq, opt![NewDeclarator]]);
    b.define(
        NewDeclarator,
        first_of![NoptrNewDeclarator, seq![PtrOperator, opt![NewDeclarator]]],
    );
    b.define(
        NoptrNewDeclarator,
        seq![
            "[",
            Expression,
            "]",
            opt![AttributeSpecifierSeq],
            zero_or_more!["[", ConstantExpression, "]", opt![AttributeSpecifierSeq]],
        ],
    );
    b.define(
        NewInitializer,
        first_of![seq!["(", opt![ExpressionList], ")"], BracedInitList],
    );
    b.define(
        DeleteExpression,
        seq![opt!["::"], Kw::Delete, opt!["[", "]"], CastExpression],
    );
    b.define(NoexceptExpression, seq![Kw::Noexcept, "(", Expression, ")"]);

    b.define(
        CastExpression,
        first_of![
            // C99 compound literal
            seq!["(", TypeId, ")", BracedInitList],
            seq![next!["(", TypeId, ")"], "(", TypeId, ")", CastExpression],
            UnaryExpression,
        ],
    )
    .collapse_single_child();
}

fn binary(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        PmExpression,
        seq![
            CastExpression,
            zero_or_more![first_of![".*", "->*"], CastExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        MultiplicativeExpression,
        seq![
            PmExpression,
            zero_or_more![first_of!["*", "/", "%"], PmExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        AdditiveExpression,
        seq![
            MultiplicativeExpression,
            zero_or_more![first_of!["+", "-"], MultiplicativeExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        ShiftExpression,
        seq![
            AdditiveExpression,
            zero_or_more![first_of!["<<", ">>"], AdditiveExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        RelationalExpression,
        seq![
            ShiftExpression,
            zero_or_more![first_of!["<", ">", "<=", ">="], ShiftExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        EqualityExpression,
        seq![
            RelationalExpression,
            zero_or_more![first_of!["==", "!="], RelationalExpression]
        ],
    )
    .collapse_single_child();
    b.define(
        AndExpression,
        seq![EqualityExpression, zero_or_more!["&", EqualityExpression]],
    )
    .collapse_single_child();
    b.define(
        ExclusiveOrExpression,
        seq![AndExpression, zero_or_more!["^", AndExpression]],
    )
    .collapse_single_child();
    b.define(
        InclusiveOrExpression,
        seq![ExclusiveOrExpression, zero_or_more!["|", ExclusiveOrExpression]],
    )
    .collapse_single_child();
    b.define(
        LogicalAndExpression,
        seq![InclusiveOrExpression, zero_or_more!["&&", InclusiveOrExpression]],
    )
    .collapse_single_child();
    b.define(
        LogicalOrExpression,
        seq![LogicalAndExpression, zero_or_more!["||", LogicalAndExpression]],
    )
    .collapse_single_child();

    // GNU allows `a ?: b`.
    let middle_operand = if ext.gnu {
        opt![Expression]
    } else {
        seq![Expression]
    };
    b.define(
        ConditionalExpression,
        first_of![
            seq![
                LogicalOrExpression,
                "?",
                middle_operand,
                ":",
                AssignmentExpression
            ],
            LogicalOrExpression,
        ],
    )
    .collapse_single_child();

    b.define(
        AssignmentExpression,
        first_of![
            seq![LogicalOrExpression, AssignmentOperator, InitializerClause],
            ConditionalExpression,
            ThrowExpression,
        ],
    )
    .collapse_single_child();

    b.define(
        AssignmentOperator,
        first_of!["=", "*=", "/=", "%=", "+=", "-=", ">>=", "<<=", "&=", "^=", "|="],
    );

    b.define(
        Expression,
        seq![AssignmentExpression, zero_or_more![",", AssignmentExpression]],
    );
    b.define(ConstantExpression, ConditionalExpression);
}
