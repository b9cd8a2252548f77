//! C++/CLI: visibilities, delegates, function modifiers, properties, events,
//! generics and attributes.
//!
//! These rules are always defined. With managed extensions off, nothing
//! outside this module references them.

use cxxparse_core::RuleId::*;
use cxxparse_core::{Keyword as Kw, first_of, next_not, one_or_more, opt, seq, zero_or_more};

use super::{GrammarBuilder, IDENTIFIER};

pub(super) fn define(b: &mut GrammarBuilder) {
    declarations(b);
    properties(b);
    events(b);
    generics(b);
    attributes(b);
}

fn declarations(b: &mut GrammarBuilder) {
    b.define(CliTopLevelVisibility, first_of![Kw::Public, Kw::Private]);

    b.define(
        CliDelegateSpecifier,
        seq![
            opt![CliAttributes],
            opt![CliTopLevelVisibility],
            "delegate",
            CliDelegateDeclSpecifierSeq,
            Declarator,
            EmptyStatement,
        ],
    );
    b.define(
        CliDelegateDeclSpecifierSeq,
        one_or_more![next_not![opt![Declarator], EmptyStatement], DeclSpecifier],
    );

    b.define(CliFunctionModifiers, one_or_more![CliFunctionModifier]);
    b.define(
        CliFunctionModifier,
        first_of!["abstract", Kw::New, "sealed", Kw::Override],
    );

    b.define(
        CliParameterArray,
        seq![opt![Attribute], "...", ParameterDeclaration],
    );
}

fn properties(b: &mut GrammarBuilder) {
    b.define(CliPropertyOrEventName, first_of![IDENTIFIER, Kw::Default]);

    b.define(
        CliPropertyDefinition,
        seq![
            opt![CliAttributes],
            opt![CliPropertyModifiers],
            "property",
            first_of![
                CliPropertyDeclSpecifierSeq,
                seq![opt![NestedNameSpecifier], opt![CliPropertyOrEventName]],
            ],
            Declarator,
            first_of![EmptyStatement, CliPropertyBody],
        ],
    );
    b.define(
        CliPropertyDeclSpecifierSeq,
        one_or_more![
            next_not![Declarator, opt![CliPropertyBody], opt![";"]],
            TypeSpecifier,
        ],
    );
    b.define(
        CliPropertyBody,
        seq![
            opt![CliPropertyIndexes],
            "{",
            CliAccessorSpecification,
            "}"
        ],
    );
    b.define(
        CliPropertyModifiers,
        one_or_more![first_of![Kw::Virtual, Kw::Static]],
    );
    b.define(
        CliPropertyIndexes,
        seq!["[", CliPropertyIndexParameterList, "]"],
    );
    b.define(
        CliPropertyIndexParameterList,
        seq![TypeId, zero_or_more![",", TypeId]],
    );

    b.define(
        CliAccessorSpecification,
        zero_or_more![opt![AccessSpecifier, ":"], CliAccessorDeclaration],
    );
    b.define(
        CliAccessorDeclaration,
        first_of![
            FunctionDefinition,
            seq![
                opt![Attribute],
                opt![SimpleDeclSpecifierSeq],
                opt![MemberDeclaratorList],
                ";",
            ],
        ],
    );
}

fn events(b: &mut GrammarBuilder) {
    b.define(
        CliEventDefinition,
        seq![
            opt![CliAttributes],
            opt![CliEventModifiers],
            "event",
            CliEventType,
            IDENTIFIER,
            first_of![
                EmptyStatement,
                seq!["{", CliAccessorSpecification, "}"]
            ],
        ],
    );
    b.define(
        CliEventModifiers,
        one_or_more![first_of![Kw::Virtual, Kw::Static]],
    );
    b.define(
        CliEventType,
        first_of![
            seq![opt!["::"], opt![NestedNameSpecifier], TypeName, opt!["^"]],
            seq![
                opt!["::"],
                opt![NestedNameSpecifier],
                Kw::Template,
                TemplateId,
                "^"
            ],
        ],
    );
}

fn generics(b: &mut GrammarBuilder) {
    b.define(
        CliGenericDeclaration,
        seq![
            "generic",
            "<",
            CliGenericParameterList,
            ">",
            opt![CliConstraintClauseList],
            Declaration,
        ],
    );
    b.define(
        CliGenericParameterList,
        seq![CliGenericParameter, zero_or_more![",", CliGenericParameter]],
    );
    b.define(
        CliGenericParameter,
        seq![
            opt![Attribute],
            first_of![Kw::Class, Kw::Typename],
            IDENTIFIER
        ],
    );

    b.define(
        CliGenericId,
        seq![CliGenericName, "<", CliGenericArgumentList, ">"],
    );
    b.define(CliGenericName, first_of![IDENTIFIER, OperatorFunctionId]);
    b.define(
        CliGenericArgumentList,
        seq![CliGenericArgument, zero_or_more![",", CliGenericArgument]],
    );
    b.define(CliGenericArgument, TypeId);

    b.define(
        CliConstraintClauseList,
        seq![CliConstraintClause, zero_or_more![CliConstraintClause]],
    );
    b.define(
        CliConstraintClause,
        seq!["where", IDENTIFIER, ":", CliConstraintItemList],
    );
    b.define(
        CliConstraintItemList,
        seq![CliConstraintItem, zero_or_more![",", CliConstraintItem]],
    );
    b.define(
        CliConstraintItem,
        first_of![
            TypeId,
            seq![
                first_of!["ref", "value"],
                first_of![Kw::Class, Kw::Struct]
            ],
            Kw::Gcnew,
        ],
    );
}

fn attributes(b: &mut GrammarBuilder) {
    b.define(CliAttributes, one_or_more![CliAttributeSection]);
    b.define(
        CliAttributeSection,
        seq![
            "[",
            opt![CliAttributeTargetSpecifier],
            CliAttributeList,
            "]"
        ],
    );
    b.define(CliAttributeTargetSpecifier, seq![CliAttributeTarget, ":"]);
    b.define(
        CliAttributeTarget,
        first_of![
            "assembly",
            Kw::Class,
            "constructor",
            "delegate",
            Kw::Enum,
            "event",
            "field",
            "interface",
            "method",
            "parameter",
            "property",
            "returnvalue",
            Kw::Struct,
        ],
    );
    b.define(
        CliAttributeList,
        seq![CliAttribute, zero_or_more![",", CliAttribute]],
    );
    b.define(CliAttribute, seq![TypeName, opt![CliAttributeArguments]]);

    // The optional positional list always matches, so `name = value` pairs
    // end up as assignment expressions there.
    b.define(
        CliAttributeArguments,
        seq![
            "(",
            first_of![
                opt![CliPositionArgumentList],
                seq![CliPositionArgumentList, ",", CliNamedArgumentList],
                CliNamedArgumentList,
            ],
            ")",
        ],
    );
    b.define(
        CliPositionArgumentList,
        seq![CliPositionArgument, zero_or_more![",", CliPositionArgument]],
    );
    b.define(CliPositionArgument, CliAttributeArgumentExpression);
    b.define(
        CliNamedArgumentList,
        seq![CliNamedArgument, zero_or_more![",", CliNamedArgument]],
    );
    b.define(
        CliNamedArgument,
        seq![IDENTIFIER, "=", CliAttributeArgumentExpression],
    );
    b.define(CliAttributeArgumentExpression, AssignmentExpression);
}
