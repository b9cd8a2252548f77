//! Statements.

use cxxparse_core::RuleId::*;
use cxxparse_core::grammar::gate;
use cxxparse_core::{Keyword as Kw, first_of, next_not, one_or_more, opt, seq, zero_or_more};

use super::{GrammarBuilder, IDENTIFIER};
use crate::Extensions;

pub(super) fn define(b: &mut GrammarBuilder, ext: &Extensions) {
    b.define(
        Statement,
        first_of![
            seq![opt![AttributeSpecifierSeq], CompoundStatement],
            LabeledStatement,
            seq![opt![AttributeSpecifierSeq], ExpressionStatement],
            seq![opt![AttributeSpecifierSeq], IfStatement],
            seq![opt![AttributeSpecifierSeq], SwitchStatement],
            seq![opt![AttributeSpecifierSeq], IterationStatement],
            seq![opt![AttributeSpecifierSeq], JumpStatement],
            DeclarationStatement,
            seq![opt![AttributeSpecifierSeq], TryBlock],
            EmptyStatement,
        ],
    );

    b.define(EmptyStatement, ";");
    b.define(
        LabeledStatement,
        seq![opt![AttributeSpecifierSeq], IDENTIFIER, ":", Statement],
    );
    b.define(ExpressionStatement, seq![opt![Expression], ";"]);
    b.define(CompoundStatement, seq!["{", opt![StatementSeq], "}"]);
    b.define(StatementSeq, one_or_more![Statement]);

    b.define(
        IfStatement,
        seq![
            Kw::If,
            "(",
            Condition,
            ")",
            Statement,
            opt![Kw::Else, Statement]
        ],
    );

    // Some system headers declare things before the first case label.
    b.define(
        SwitchStatement,
        seq![
            Kw::Switch,
            "(",
            Condition,
            ")",
            first_of![
                seq!["{", SwitchBlockStatementGroups, "}"],
                SwitchBlockStatementGroups
            ],
        ],
    );
    b.define(
        SwitchBlockStatementGroups,
        seq![
            "{",
            opt![DeclarationSeq],
            zero_or_more![SwitchBlockStatementGroup],
            "}"
        ],
    );
    b.define(
        SwitchBlockStatementGroup,
        seq![
            SwitchLabelStatement,
            opt![EmptyStatement],
            zero_or_more![Statement],
            opt![JumpStatement],
        ],
    );
    b.define(
        SwitchLabelStatement,
        first_of![
            seq![Kw::Case, ConstantExpression, ":"],
            // case range
            gate(
                ext.gnu,
                seq![Kw::Case, ConstantExpression, "...", ConstantExpression, ":"]
            ),
            seq![Kw::Default, ":"],
        ],
    );

    b.define(
        Condition,
        first_of![
            seq![
                opt![AttributeSpecifierSeq],
                ConditionDeclSpecifierSeq,
                Declarator,
                first_of![seq!["=", InitializerClause], BracedInitList],
            ],
            Expression,
        ],
    );
    b.define(
        ConditionDeclSpecifierSeq,
        seq![
            one_or_more![
                next_not![Declarator, first_of!["=", "{"]],
                DeclSpecifier
            ],
            opt![AttributeSpecifierSeq],
        ],
    );

    b.define(
        IterationStatement,
        first_of![
            seq![Kw::While, "(", Condition, ")", Statement],
            seq![
                Kw::Do,
                Statement,
                Kw::While,
                "(",
                Expression,
                ")",
                ";"
            ],
            seq![
                Kw::For,
                "(",
                ForInitStatement,
                opt![Condition],
                ";",
                opt![Expression],
                ")",
                Statement
            ],
            seq![
                Kw::For,
                "(",
                ForRangeDeclaration,
                ":",
                ForRangeInitializer,
                ")",
                Statement
            ],
            gate(
                ext.managed,
                seq![
                    Kw::For,
                    "each",
                    "(",
                    ForRangeDeclaration,
                    "in",
                    ForRangeInitializer,
                    ")",
                    Statement
                ]
            ),
        ],
    );
    b.define(ForInitStatement, first_of![ExpressionStatement, SimpleDeclaration]);
    b.define(
        ForRangeDeclaration,
        seq![opt![AttributeSpecifierSeq], ForRangeDeclSpecifierSeq, Declarator],
    );
    b.define(
        ForRangeDeclSpecifierSeq,
        one_or_more![
            next_not![opt![Declarator], first_of![":", "in"]],
            DeclSpecifier,
            opt![AttributeSpecifierSeq],
        ],
    );
    b.define(ForRangeInitializer, first_of![Expression, BracedInitList]);

    b.define(
        JumpStatement,
        first_of![
            seq![Kw::Break, ";"],
            seq![Kw::Continue, ";"],
            seq![Kw::Return, opt![Expression], ";"],
            seq![Kw::Return, BracedInitList, ";"],
            seq![Kw::Goto, IDENTIFIER, ";"],
        ],
    );

    b.define(DeclarationStatement, BlockDeclaration);
}
