//! Declarations, specifiers, enums, namespaces, `using`, `asm`, linkage
//! specifications and attributes.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::{any_token, gate};
use cxxparse_core::{Keyword as Kw, first_of, next_not, one_or_more, opt, seq, zero_or_more};

use super::{EOF, GrammarBuilder, IDENTIFIER, STRING};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    declarations(b, ext);
    specifiers(b, ext);
    enums(b, ext);
    namespaces(b);
    assembler(b, ext);
    attributes(b, ext);
}

fn declarations(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(DeclarationSeq, one_or_more![Declaration]);

    b.define(
        Declaration,
        first_of![
            BlockDeclaration,
            FunctionDefinition,
            TemplateDeclaration,
            gate(ext.managed, CliGenericDeclaration),
            ExplicitInstantiation,
            ExplicitSpecialization,
            LinkageSpecification,
            NamespaceDefinition,
            EmptyDeclaration,
            AttributeDeclaration,
            gate(ext.attributed_atl, VcAtlDeclaration),
        ],
    );

    b.define(
        BlockDeclaration,
        first_of![
            SimpleDeclaration,
            AsmDefinition,
            NamespaceAliasDefinition,
            UsingDeclaration,
            UsingDirective,
            StaticAssertDeclaration,
            AliasDeclaration,
            OpaqueEnumDeclaration,
        ],
    );

    b.define(
        AliasDeclaration,
        seq![
            Kw::Using,
            IDENTIFIER,
            opt![AttributeSpecifierSeq],
            "=",
            TypeId
        ],
    );

    b.define(
        SimpleDeclaration,
        seq![
            opt![gate(ext.managed, CliAttributes)],
            opt![AttributeSpecifierSeq],
            opt![SimpleDeclSpecifierSeq],
            opt![InitDeclaratorList],
            ";",
        ],
    );
    // Stop before the declarator so `T x;` does not take `x` as a type name.
    b.define(
        SimpleDeclSpecifierSeq,
        one_or_more![
            next_not![opt![InitDeclaratorList], ";"],
            DeclSpecifier,
            opt![AttributeSpecifierSeq],
        ],
    );

    b.define(
        StaticAssertDeclaration,
        seq![
            Kw::StaticAssert,
            "(",
            ConstantExpression,
            ",",
            STRING,
            ")",
            ";"
        ],
    );
    b.define(EmptyDeclaration, ";");
    b.define(AttributeDeclaration, seq![AttributeSpecifierSeq, ";"]);
}

fn specifiers(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        DeclSpecifier,
        first_of![
            Kw::Friend,
            Kw::Typedef,
            Kw::Constexpr,
            StorageClassSpecifier,
            FunctionSpecifier,
            TypeSpecifier,
        ],
    );
    b.define(
        StorageClassSpecifier,
        first_of![
            Kw::Register,
            Kw::Static,
            Kw::ThreadLocal,
            Kw::Extern,
            Kw::Mutable
        ],
    );
    b.define(
        FunctionSpecifier,
        first_of![Kw::Inline, Kw::Virtual, Kw::Explicit],
    );
    b.define(TypedefName, IDENTIFIER);

    b.define(
        TypeSpecifierSeq,
        seq![one_or_more![TypeSpecifier], opt![AttributeSpecifierSeq]],
    );
    b.define(
        TypeSpecifier,
        first_of![ClassSpecifier, EnumSpecifier, TrailingTypeSpecifier],
    );
    b.define(
        TrailingTypeSpecifierSeq,
        seq![
            one_or_more![TrailingTypeSpecifier],
            opt![AttributeSpecifierSeq]
        ],
    );
    b.define(
        TrailingTypeSpecifier,
        first_of![
            SimpleTypeSpecifier,
            ElaboratedTypeSpecifier,
            TypenameSpecifier,
            CvQualifier,
            gate(ext.managed, CliDelegateSpecifier),
        ],
    );

    b.define(
        SimpleTypeSpecifier,
        first_of![
            Kw::Char,
            Kw::Char16T,
            Kw::Char32T,
            Kw::WcharT,
            Kw::Bool,
            Kw::Short,
            Kw::Int,
            Kw::Long,
            Kw::Signed,
            Kw::Unsigned,
            Kw::Float,
            Kw::Double,
            Kw::Void,
            Kw::Auto,
            DecltypeSpecifier,
            seq![opt!["::"], opt![NestedNameSpecifier], TypeName],
            seq![
                opt!["::"],
                opt![NestedNameSpecifier],
                Kw::Template,
                SimpleTemplateId
            ],
        ],
    );

    b.define(
        TypeName,
        first_of![ClassName, EnumName, TypedefName, SimpleTemplateId],
    );

    // GNU `typeof` maps here, so a type specifier sequence is accepted too.
    b.define(
        DecltypeSpecifier,
        seq![
            Kw::Decltype,
            "(",
            first_of![Expression, TypeSpecifierSeq],
            ")"
        ],
    );

    let cli_attributes = || opt![gate(ext.managed, CliAttributes)];
    b.define(
        ElaboratedTypeSpecifier,
        first_of![
            seq![
                cli_attributes(),
                ClassKey,
                opt![NestedNameSpecifier],
                opt![Kw::Template],
                SimpleTemplateId,
            ],
            // `::` covers `friend class ::A`
            seq![
                cli_attributes(),
                ClassKey,
                opt![AttributeSpecifierSeq],
                opt![first_of![NestedNameSpecifier, "::"]],
                IDENTIFIER,
            ],
            seq![
                cli_attributes(),
                EnumKey,
                opt![NestedNameSpecifier],
                IDENTIFIER
            ],
        ],
    );
}

fn enums(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(EnumName, IDENTIFIER);
    b.define(
        EnumSpecifier,
        first_of![
            seq![EnumHead, "{", opt![EnumeratorList], "}"],
            seq![EnumHead, "{", EnumeratorList, ",", "}"],
        ],
    );
    b.define(
        EnumHead,
        seq![
            opt![gate(ext.attributed_atl, VcAtlAttribute)],
            opt![gate(ext.managed, CliTopLevelVisibility)],
            EnumKey,
            opt![AttributeSpecifierSeq],
            first_of![seq![NestedNameSpecifier, IDENTIFIER], opt![IDENTIFIER]],
            opt![EnumBase],
        ],
    );
    b.define(
        OpaqueEnumDeclaration,
        seq![
            EnumKey,
            opt![AttributeSpecifierSeq],
            IDENTIFIER,
            opt![EnumBase],
            ";"
        ],
    );
    b.define(
        EnumKey,
        seq![Kw::Enum, opt![first_of![Kw::Class, Kw::Struct]]],
    );
    b.define(EnumBase, seq![":", TypeSpecifierSeq]);
    b.define(
        EnumeratorList,
        seq![
            EnumeratorDefinition,
            zero_or_more![",", EnumeratorDefinition]
        ],
    );
    b.define(
        EnumeratorDefinition,
        seq![Enumerator, opt!["=", ConstantExpression]],
    );
    b.define(Enumerator, IDENTIFIER);
}

fn namespaces(b: &mut GrammarBuilder) {
    b.define(NamespaceName, first_of![OriginalNamespaceName, NamespaceAlias]);
    b.define(OriginalNamespaceName, IDENTIFIER);

    b.define(
        NamespaceDefinition,
        first_of![NamedNamespaceDefinition, UnnamedNamespaceDefinition],
    );
    b.define(
        NamedNamespaceDefinition,
        first_of![OriginalNamespaceDefinition, ExtensionNamespaceDefinition],
    );
    b.define(
        OriginalNamespaceDefinition,
        seq![opt![Kw::Inline], Kw::Namespace, IDENTIFIER, NamespaceBlock],
    );
    b.define(
        ExtensionNamespaceDefinition,
        seq![
            opt![Kw::Inline],
            Kw::Namespace,
            OriginalNamespaceName,
            NamespaceBlock
        ],
    );
    b.define(
        UnnamedNamespaceDefinition,
        seq![opt![Kw::Inline], Kw::Namespace, NamespaceBlock],
    );
    b.define(NamespaceBlock, seq!["{", opt![DeclarationSeq], "}"]);

    b.define(NamespaceAlias, IDENTIFIER);
    b.define(
        NamespaceAliasDefinition,
        seq![
            Kw::Namespace,
            IDENTIFIER,
            "=",
            QualifiedNamespaceSpecifier,
            ";"
        ],
    );
    b.define(
        QualifiedNamespaceSpecifier,
        seq![opt![NestedNameSpecifier], NamespaceName],
    );

    b.define(
        UsingDeclaration,
        first_of![
            seq![
                Kw::Using,
                opt![Kw::Typename],
                NestedNameSpecifier,
                UnqualifiedId,
                ";"
            ],
            seq![Kw::Using, "::", UnqualifiedId, ";"],
        ],
    );
    b.define(
        UsingDirective,
        seq![
            opt![AttributeSpecifier],
            Kw::Using,
            Kw::Namespace,
            opt!["::"],
            opt![NestedNameSpecifier],
            NamespaceName,
            ";",
        ],
    );

    b.define(
        LinkageSpecification,
        seq![
            Kw::Extern,
            STRING,
            first_of![seq!["{", opt![DeclarationSeq], "}"], Declaration],
        ],
    );
}

fn assembler(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        AsmDefinition,
        first_of![
            seq![Kw::Asm, "(", STRING, ")", ";"],
            // Visual C++ instruction list and single instruction
            seq![
                Kw::Asm,
                "{",
                one_or_more![next_not![first_of!["}", EOF]], any_token()],
                "}",
                opt![";"],
            ],
            seq![
                Kw::Asm,
                one_or_more![next_not![first_of![";", EOF]], any_token()],
                ";"
            ],
            // GNU extended asm with operands and clobbers
            gate(
                ext.gnu,
                seq![
                    Kw::Asm,
                    opt![Kw::Volatile],
                    "(",
                    zero_or_more![first_of![
                        STRING,
                        ":",
                        ",",
                        seq!["[", IDENTIFIER, "]"],
                        seq!["(", Expression, ")"],
                    ]],
                    ")",
                    ";",
                ]
            ),
        ],
    );
}

fn attributes(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(AttributeSpecifierSeq, one_or_more![AttributeSpecifier]);
    b.define(
        AttributeSpecifier,
        first_of![
            seq!["[", "[", AttributeList, "]", "]"],
            gate(ext.gnu, seq![Kw::Asm, "(", STRING, ")"]),
            gate(ext.managed, CliAttributes),
            AlignmentSpecifier,
        ],
    );
    b.define(
        AlignmentSpecifier,
        first_of![
            seq![Kw::Alignas, "(", TypeId, opt!["..."], ")"],
            seq![Kw::Alignas, "(", AssignmentExpression, opt!["..."], ")"],
        ],
    );
    b.define(
        AttributeList,
        seq![opt![Attribute], zero_or_more![",", Attribute]],
    );
    b.define(Attribute, seq![AttributeToken, opt![AttributeArgumentClause]]);
    b.define(AttributeToken, first_of![IDENTIFIER, AttributeScopedToken]);
    b.define(
        AttributeScopedToken,
        seq![AttributeNamespace, "::", IDENTIFIER],
    );
    b.define(AttributeNamespace, IDENTIFIER);
    b.define(AttributeArgumentClause, BalancedTokenSeq);
    b.define(BalancedTokenSeq, zero_or_more![BalancedToken]);
    b.define(
        BalancedToken,
        first_of![
            seq!["(", BalancedTokenSeq, ")"],
            seq!["{", BalancedTokenSeq, "}"],
            seq!["[", BalancedTokenSeq, "]"],
            one_or_more![
                next_not![first_of!["(", ")", "{", "}", "[", "]", EOF]],
                any_token()
            ],
        ],
    );
}
