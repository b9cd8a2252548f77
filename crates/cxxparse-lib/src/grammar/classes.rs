//! Classes, members, base classes, special member functions and operator
//! overloading.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, next_not, one_or_more, opt, seq, zero_or_more};

use super::{GrammarBuilder, IDENTIFIER};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    classes(b, ext);
    members(b, ext);
    derived_classes(b, ext);
    special_member_functions(b);
    overloading(b);
}

fn classes(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        ClassName,
        first_of![SimpleTemplateId, seq![opt!["::"], IDENTIFIER]],
    );

    // GNU allows attributes after the class body.
    b.define(
        ClassSpecifier,
        seq![
            opt![gate(ext.attributed_atl, VcAtlAttribute)],
            ClassHead,
            "{",
            opt![MemberSpecification],
            "}",
            opt![AttributeSpecifierSeq],
        ],
    );

    let head = || {
        seq![
            opt![gate(ext.managed, CliTopLevelVisibility)],
            opt![gate(ext.attributed_atl, VcAtlAttribute)],
            ClassKey,
            opt![AttributeSpecifierSeq],
        ]
    };
    b.define(
        ClassHead,
        first_of![
            seq![
                head(),
                ClassHeadName,
                opt![ClassVirtSpecifier],
                opt![BaseClause],
                opt![AttributeSpecifierSeq],
            ],
            seq![head(), opt![BaseClause]],
        ],
    );
    b.define(ClassHeadName, seq![opt![NestedNameSpecifier], ClassName]);
    b.define(
        ClassVirtSpecifier,
        first_of![
            Kw::Final,
            gate(ext.managed, "sealed"),
            gate(ext.managed, "abstract")
        ],
    );

    let aggregate = || opt![gate(ext.managed, first_of!["ref", "value", "interface"])];
    b.define(
        ClassKey,
        first_of![
            seq![aggregate(), Kw::Class],
            seq![aggregate(), Kw::Struct],
            Kw::Union,
        ],
    );
}

fn members(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        MemberSpecification,
        one_or_more![first_of![MemberDeclaration, seq![AccessSpecifier, ":"]]],
    );

    b.define(
        MemberDeclaration,
        first_of![
            seq![FunctionDefinition, opt![EmptyStatement]],
            seq![
                opt![AttributeSpecifierSeq],
                opt![gate(ext.attributed_atl, VcAtlAttribute)],
                opt![gate(ext.managed, first_of!["initonly", "literal"])],
                opt![MemberDeclSpecifierSeq],
                opt![MemberDeclaratorList],
                EmptyStatement,
            ],
            seq![
                opt!["::"],
                NestedNameSpecifier,
                opt![Kw::Template],
                UnqualifiedId,
                EmptyStatement,
            ],
            UsingDeclaration,
            StaticAssertDeclaration,
            TemplateDeclaration,
            AliasDeclaration,
            gate(ext.managed, CliGenericDeclaration),
            gate(ext.managed, CliDelegateSpecifier),
            gate(ext.managed, CliEventDefinition),
            gate(ext.managed, CliPropertyDefinition),
        ],
    );

    b.define(
        MemberDeclSpecifierSeq,
        seq![
            one_or_more![
                next_not![opt![MemberDeclaratorList], EmptyStatement],
                DeclSpecifier
            ],
            opt![AttributeSpecifierSeq],
        ],
    );
    b.define(
        MemberDeclaratorList,
        seq![MemberDeclarator, zero_or_more![",", MemberDeclarator]],
    );
    b.define(
        MemberDeclarator,
        first_of![
            seq![Declarator, BraceOrEqualInitializer],
            // bit field
            seq![
                opt![IDENTIFIER],
                opt![AttributeSpecifierSeq],
                ":",
                ConstantExpression
            ],
            seq![
                Declarator,
                opt![gate(ext.managed, CliFunctionModifiers)],
                opt![VirtSpecifierSeq],
                opt![PureSpecifier],
            ],
            Declarator,
        ],
    );

    b.define(VirtSpecifierSeq, one_or_more![VirtSpecifier]);
    b.define(VirtSpecifier, first_of![Kw::Override, Kw::Final]);
    b.define(PureSpecifier, seq!["=", "0"]);
}

fn derived_classes(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(BaseClause, seq![":", BaseSpecifierList]);
    b.define(
        BaseSpecifierList,
        seq![
            BaseSpecifier,
            opt!["..."],
            zero_or_more![",", BaseSpecifier, opt!["..."]],
        ],
    );
    b.define(
        BaseSpecifier,
        first_of![
            seq![opt![AttributeSpecifierSeq], BaseTypeSpecifier],
            seq![
                opt![AttributeSpecifierSeq],
                Kw::Virtual,
                opt![AccessSpecifier],
                BaseTypeSpecifier,
            ],
            seq![
                opt![AttributeSpecifierSeq],
                AccessSpecifier,
                opt![Kw::Virtual],
                BaseTypeSpecifier,
            ],
        ],
    );
    b.define(ClassOrDecltype, first_of![ClassHeadName, DecltypeSpecifier]);
    b.define(BaseTypeSpecifier, ClassOrDecltype);

    // The two-keyword forms are C++/CLI assembly visibilities.
    b.define(
        AccessSpecifier,
        first_of![
            gate(ext.managed, seq![Kw::Protected, Kw::Public]),
            gate(ext.managed, seq![Kw::Public, Kw::Protected]),
            gate(ext.managed, seq![Kw::Protected, Kw::Private]),
            gate(ext.managed, seq![Kw::Private, Kw::Protected]),
            Kw::Private,
            Kw::Protected,
            Kw::Public,
            gate(ext.managed, "internal"),
        ],
    );
}

fn special_member_functions(b: &mut GrammarBuilder) {
    b.define(ConversionFunctionId, seq![Kw::Operator, ConversionTypeId]);
    b.define(
        ConversionTypeId,
        seq![TypeSpecifierSeq, opt![ConversionDeclarator]],
    );
    b.define(ConversionDeclarator, one_or_more![PtrOperator]);

    b.define(CtorInitializer, seq![":", MemInitializerList]);
    b.define(
        MemInitializerList,
        seq![
            MemInitializer,
            opt!["..."],
            zero_or_more![",", MemInitializer, opt!["..."]],
        ],
    );
    b.define(
        MemInitializer,
        first_of![
            seq![MemInitializerId, "(", opt![ExpressionList], ")"],
            seq![MemInitializerId, BracedInitList],
        ],
    );
    b.define(MemInitializerId, first_of![ClassOrDecltype, IDENTIFIER]);
}

fn overloading(b: &mut GrammarBuilder) {
    b.define(OperatorFunctionId, seq![Kw::Operator, OverloadableOperator]);

    b.define(
        OverloadableOperator,
        first_of![
            seq![Kw::New, "[", "]"],
            seq![Kw::Delete, "[", "]"],
            Kw::New,
            Kw::Delete,
            "+",
            "-",
            "!",
            "=",
            "^=",
            "&=",
            "<=",
            ">=",
            seq!["(", ")"],
            seq!["[", "]"],
            "*",
            "<",
            "|=",
            "&&",
            "/",
            ">",
            "<<",
            "||",
            "%",
            "+=",
            ">>",
            "++",
            "^",
            "-=",
            ">>=",
            "--",
            "&",
            "*=",
            "<<=",
            ",",
            "|",
            "/=",
            "==",
            "->*",
            "~",
            "%=",
            "!=",
            "->",
        ],
    );

    b.define(LiteralOperatorId, seq![Kw::Operator, "\"\"", IDENTIFIER]);
}
