//! Rule registry.
//!
//! One identifier per grammar rule. The identifiers are the vocabulary shared by
//! the grammar graph, the engine, the parse tree and downstream consumers, so
//! they must stay stable: `index()` is the position in `RuleId::ALL`.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! rule_ids {
    ($($(#[$doc:meta])* $variant:ident => $name:literal;)*) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "&'static str", try_from = "String")]
        #[repr(u16)]
        pub enum RuleId {
            $($(#[$doc])* $variant,)*
        }

        impl RuleId {
            pub const ALL: &'static [RuleId] = &[$(RuleId::$variant,)*];

            /// camelCase name, e.g. `simpleTemplateId`.
            pub fn name(self) -> &'static str {
                match self {
                    $(RuleId::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<RuleId> {
                match name {
                    $($name => Some(RuleId::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Debug for RuleId {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(RuleId::$variant => f.write_str(stringify!($variant)),)*
                }
            }
        }
    };
}

rule_ids! {
    // Literals
    BooleanLiteral => "booleanLiteral";
    PointerLiteral => "pointerLiteral";
    Literal => "literal";

    // Top level
    TranslationUnit => "translationUnit";

    // Expressions
    PrimaryExpression => "primaryExpression";
    IdExpression => "idExpression";
    UnqualifiedId => "unqualifiedId";
    QualifiedId => "qualifiedId";
    NestedNameSpecifier => "nestedNameSpecifier";
    LambdaExpression => "lambdaExpression";
    LambdaIntroducer => "lambdaIntroducer";
    LambdaCapture => "lambdaCapture";
    CaptureDefault => "captureDefault";
    CaptureList => "captureList";
    Capture => "capture";
    LambdaDeclarator => "lambdaDeclarator";
    PostfixExpression => "postfixExpression";
    ExpressionList => "expressionList";
    PseudoDestructorName => "pseudoDestructorName";
    UnaryExpression => "unaryExpression";
    UnaryOperator => "unaryOperator";
    BinaryOperator => "binaryOperator";
    NewExpression => "newExpression";
    NewPlacement => "newPlacement";
    NewTypeId => "newTypeId";
    NewDeclarator => "newDeclarator";
    NoptrNewDeclarator => "noptrNewDeclarator";
    NewInitializer => "newInitializer";
    DeleteExpression => "deleteExpression";
    NoexceptExpression => "noexceptExpression";
    CastExpression => "castExpression";
    PmExpression => "pmExpression";
    MultiplicativeExpression => "multiplicativeExpression";
    AdditiveExpression => "additiveExpression";
    ShiftExpression => "shiftExpression";
    RelationalExpression => "relationalExpression";
    EqualityExpression => "equalityExpression";
    AndExpression => "andExpression";
    ExclusiveOrExpression => "exclusiveOrExpression";
    InclusiveOrExpression => "inclusiveOrExpression";
    LogicalAndExpression => "logicalAndExpression";
    LogicalOrExpression => "logicalOrExpression";
    ConditionalExpression => "conditionalExpression";
    AssignmentExpression => "assignmentExpression";
    AssignmentOperator => "assignmentOperator";
    ParExpression => "parExpression";
    Expression => "expression";
    ConstantExpression => "constantExpression";

    // Statements
    Statement => "statement";
    EmptyStatement => "emptyStatement";
    LabeledStatement => "labeledStatement";
    ExpressionStatement => "expressionStatement";
    CompoundStatement => "compoundStatement";
    StatementSeq => "statementSeq";
    Condition => "condition";
    IfStatement => "ifStatement";
    SwitchStatement => "switchStatement";
    SwitchBlockStatementGroups => "switchBlockStatementGroups";
    SwitchBlockStatementGroup => "switchBlockStatementGroup";
    SwitchLabelStatement => "switchLabelStatement";
    IterationStatement => "iterationStatement";
    ForInitStatement => "forInitStatement";
    ForRangeDeclaration => "forRangeDeclaration";
    ForRangeInitializer => "forRangeInitializer";
    JumpStatement => "jumpStatement";
    DeclarationStatement => "declarationStatement";

    // Declarations
    DeclarationSeq => "declarationSeq";
    Declaration => "declaration";
    BlockDeclaration => "blockDeclaration";
    AliasDeclaration => "aliasDeclaration";
    SimpleDeclaration => "simpleDeclaration";
    StaticAssertDeclaration => "staticAssertDeclaration";
    EmptyDeclaration => "emptyDeclaration";
    AttributeDeclaration => "attributeDeclaration";
    DeclSpecifier => "declSpecifier";
    RecoveredDeclaration => "recoveredDeclaration";
    VcAtlDeclaration => "vcAtlDeclaration";
    ConditionDeclSpecifierSeq => "conditionDeclSpecifierSeq";
    ForRangeDeclSpecifierSeq => "forRangeDeclSpecifierSeq";
    ParameterDeclSpecifierSeq => "parameterDeclSpecifierSeq";
    FunctionDeclSpecifierSeq => "functionDeclSpecifierSeq";
    SimpleDeclSpecifierSeq => "simpleDeclSpecifierSeq";
    MemberDeclSpecifierSeq => "memberDeclSpecifierSeq";
    StorageClassSpecifier => "storageClassSpecifier";
    FunctionSpecifier => "functionSpecifier";
    TypedefName => "typedefName";
    TypeSpecifier => "typeSpecifier";
    TypeSpecifierSeq => "typeSpecifierSeq";
    TrailingTypeSpecifier => "trailingTypeSpecifier";
    TrailingTypeSpecifierSeq => "trailingTypeSpecifierSeq";
    SimpleTypeSpecifier => "simpleTypeSpecifier";
    TypeName => "typeName";
    DecltypeSpecifier => "decltypeSpecifier";
    ElaboratedTypeSpecifier => "elaboratedTypeSpecifier";
    EnumName => "enumName";
    EnumSpecifier => "enumSpecifier";
    EnumHead => "enumHead";
    OpaqueEnumDeclaration => "opaqueEnumDeclaration";
    EnumKey => "enumKey";
    EnumBase => "enumBase";
    EnumeratorList => "enumeratorList";
    EnumeratorDefinition => "enumeratorDefinition";
    Enumerator => "enumerator";
    NamespaceName => "namespaceName";
    OriginalNamespaceName => "originalNamespaceName";
    NamespaceDefinition => "namespaceDefinition";
    NamedNamespaceDefinition => "namedNamespaceDefinition";
    OriginalNamespaceDefinition => "originalNamespaceDefinition";
    ExtensionNamespaceDefinition => "extensionNamespaceDefinition";
    UnnamedNamespaceDefinition => "unnamedNamespaceDefinition";
    NamespaceBlock => "namespaceBlock";
    NamespaceAlias => "namespaceAlias";
    NamespaceAliasDefinition => "namespaceAliasDefinition";
    QualifiedNamespaceSpecifier => "qualifiedNamespaceSpecifier";
    UsingDeclaration => "usingDeclaration";
    UsingDirective => "usingDirective";
    AsmDefinition => "asmDefinition";
    LinkageSpecification => "linkageSpecification";
    AttributeSpecifierSeq => "attributeSpecifierSeq";
    AttributeSpecifier => "attributeSpecifier";
    AlignmentSpecifier => "alignmentSpecifier";
    AttributeList => "attributeList";
    Attribute => "attribute";
    AttributeToken => "attributeToken";
    AttributeScopedToken => "attributeScopedToken";
    AttributeNamespace => "attributeNamespace";
    AttributeArgumentClause => "attributeArgumentClause";
    BalancedTokenSeq => "balancedTokenSeq";
    BalancedToken => "balancedToken";
    VcAtlAttribute => "vcAtlAttribute";

    // Declarators
    InitDeclaratorList => "initDeclaratorList";
    InitDeclarator => "initDeclarator";
    Declarator => "declarator";
    PtrDeclarator => "ptrDeclarator";
    NoptrDeclarator => "noptrDeclarator";
    ParametersAndQualifiers => "parametersAndQualifiers";
    TrailingReturnType => "trailingReturnType";
    PtrOperator => "ptrOperator";
    CvQualifierSeq => "cvQualifierSeq";
    CvQualifier => "cvQualifier";
    RefQualifier => "refQualifier";
    DeclaratorId => "declaratorId";
    TypeId => "typeId";
    TypeIdEnclosed => "typeIdEnclosed";
    AbstractDeclarator => "abstractDeclarator";
    PtrAbstractDeclarator => "ptrAbstractDeclarator";
    NoptrAbstractDeclarator => "noptrAbstractDeclarator";
    AbstractPackDeclarator => "abstractPackDeclarator";
    NoptrAbstractPackDeclarator => "noptrAbstractPackDeclarator";
    ParameterDeclarationClause => "parameterDeclarationClause";
    ParameterDeclarationList => "parameterDeclarationList";
    ParameterDeclaration => "parameterDeclaration";
    FunctionDefinition => "functionDefinition";
    FunctionBody => "functionBody";
    Initializer => "initializer";
    BraceOrEqualInitializer => "braceOrEqualInitializer";
    InitializerClause => "initializerClause";
    InitializerList => "initializerList";
    BracedInitList => "bracedInitList";

    // Classes
    ClassName => "className";
    ClassSpecifier => "classSpecifier";
    ClassHead => "classHead";
    ClassHeadName => "classHeadName";
    ClassVirtSpecifier => "classVirtSpecifier";
    ClassKey => "classKey";
    MemberSpecification => "memberSpecification";
    MemberDeclaration => "memberDeclaration";
    MemberDeclaratorList => "memberDeclaratorList";
    MemberDeclarator => "memberDeclarator";
    VirtSpecifierSeq => "virtSpecifierSeq";
    VirtSpecifier => "virtSpecifier";
    PureSpecifier => "pureSpecifier";

    // C++/CLI classes, properties, events, delegates, generics and attributes
    CliTopLevelVisibility => "cliTopLevelVisibility";
    CliFinallyClause => "cliFinallyClause";
    CliFunctionModifiers => "cliFunctionModifiers";
    CliFunctionModifier => "cliFunctionModifier";
    CliEventDefinition => "cliEventDefinition";
    CliEventModifiers => "cliEventModifiers";
    CliPropertyOrEventName => "cliPropertyOrEventName";
    CliEventType => "cliEventType";
    CliParameterArray => "cliParameterArray";
    CliPropertyDefinition => "cliPropertyDefinition";
    CliPropertyDeclSpecifierSeq => "cliPropertyDeclSpecifierSeq";
    CliPropertyBody => "cliPropertyBody";
    CliPropertyModifiers => "cliPropertyModifiers";
    CliPropertyIndexes => "cliPropertyIndexes";
    CliPropertyIndexParameterList => "cliPropertyIndexParameterList";
    CliAccessorSpecification => "cliAccessorSpecification";
    CliAccessorDeclaration => "cliAccessorDeclaration";
    CliDelegateSpecifier => "cliDelegateSpecifier";
    CliDelegateDeclSpecifierSeq => "cliDelegateDeclSpecifierSeq";
    CliGenericDeclaration => "cliGenericDeclaration";
    CliGenericParameterList => "cliGenericParameterList";
    CliConstraintClauseList => "cliConstraintClauseList";
    CliConstraintItemList => "cliConstraintItemList";
    CliGenericParameter => "cliGenericParameter";
    CliGenericId => "cliGenericId";
    CliGenericName => "cliGenericName";
    CliGenericArgumentList => "cliGenericArgumentList";
    CliGenericArgument => "cliGenericArgument";
    CliConstraintClause => "cliConstraintClause";
    CliConstraintItem => "cliConstraintItem";
    CliAttributes => "cliAttributes";
    CliAttributeSection => "cliAttributeSection";
    CliAttributeTargetSpecifier => "cliAttributeTargetSpecifier";
    CliAttributeTarget => "cliAttributeTarget";
    CliAttributeList => "cliAttributeList";
    CliAttribute => "cliAttribute";
    CliAttributeArguments => "cliAttributeArguments";
    CliPositionArgumentList => "cliPositionArgumentList";
    CliNamedArgumentList => "cliNamedArgumentList";
    CliPositionArgument => "cliPositionArgument";
    CliNamedArgument => "cliNamedArgument";
    CliAttributeArgumentExpression => "cliAttributeArgumentExpression";

    // Derived classes, special members, overloading
    BaseClause => "baseClause";
    BaseSpecifierList => "baseSpecifierList";
    BaseSpecifier => "baseSpecifier";
    ClassOrDecltype => "classOrDecltype";
    BaseTypeSpecifier => "baseTypeSpecifier";
    AccessSpecifier => "accessSpecifier";
    ConversionFunctionId => "conversionFunctionId";
    ConversionTypeId => "conversionTypeId";
    ConversionDeclarator => "conversionDeclarator";
    CtorInitializer => "ctorInitializer";
    MemInitializerList => "memInitializerList";
    MemInitializer => "memInitializer";
    MemInitializerId => "memInitializerId";
    OperatorFunctionId => "operatorFunctionId";
    OverloadableOperator => "overloadableOperator";
    LiteralOperatorId => "literalOperatorId";

    // Templates
    TemplateDeclaration => "templateDeclaration";
    TemplateParameterList => "templateParameterList";
    TemplateParameterListEnclosed => "templateParameterListEnclosed";
    TemplateParameter => "templateParameter";
    TypeParameter => "typeParameter";
    InnerTypeParameter => "innerTypeParameter";
    SimpleTemplateId => "simpleTemplateId";
    TemplateId => "templateId";
    TemplateName => "templateName";
    TemplateArgumentList => "templateArgumentList";
    TemplateArgument => "templateArgument";
    InnerSimpleTemplateId => "innerSimpleTemplateId";
    InnerTrailingTypeSpecifier => "innerTrailingTypeSpecifier";
    InnerTypeId => "innerTypeId";
    InnerTemplateId => "innerTemplateId";
    InnerTemplateArgumentList => "innerTemplateArgumentList";
    InnerTemplateArgument => "innerTemplateArgument";
    TypenameSpecifier => "typenameSpecifier";
    ExplicitInstantiation => "explicitInstantiation";
    ExplicitSpecialization => "explicitSpecialization";

    // Exception handling
    TryBlock => "tryBlock";
    FunctionTryBlock => "functionTryBlock";
    HandlerSeq => "handlerSeq";
    Handler => "handler";
    ExceptionDeclaration => "exceptionDeclaration";
    ThrowExpression => "throwExpression";
    ExceptionSpecification => "exceptionSpecification";
    DynamicExceptionSpecification => "dynamicExceptionSpecification";
    TypeIdList => "typeIdList";
    NoexceptSpecification => "noexceptSpecification";
}

impl RuleId {
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<RuleId> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<RuleId> for &'static str {
    fn from(rule: RuleId) -> Self {
        rule.name()
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        RuleId::from_name(&name).ok_or_else(|| format!("unknown rule `{name}`"))
    }
}
