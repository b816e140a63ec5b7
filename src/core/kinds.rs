//! Syntactic kind taxonomy and the category distance table.
//!
//! Raw kinds come from a closed enum the extractor produces. Each raw kind
//! belongs to one of 40 semantic categories; the distance between two
//! categories is a calibrated value in [0, 1] used to soften rename costs in
//! the edit-distance engine. Unlisted category pairs are maximally distant.

use once_cell::sync::Lazy;

/// Raw syntactic kind of a tree node. Closed taxonomy: the extractor maps
/// every grammar node it understands onto one of these and everything else
/// onto `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // Literals
    IntegerLiteral,
    RealLiteral,
    StringLiteral,
    InterpolatedString,
    CharacterLiteral,
    BooleanLiteral,
    NullLiteral,
    DefaultLiteral,

    // Names
    Identifier,
    QualifiedName,
    GenericName,
    PredefinedType,
    ThisExpression,
    BaseExpression,

    // Arithmetic
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModuloExpression,
    UnaryPlusExpression,
    UnaryMinusExpression,
    PreIncrementExpression,
    PreDecrementExpression,
    PostIncrementExpression,
    PostDecrementExpression,

    // Logical
    LogicalAndExpression,
    LogicalOrExpression,
    LogicalNotExpression,
    CoalesceExpression,

    // Bitwise
    BitwiseAndExpression,
    BitwiseOrExpression,
    ExclusiveOrExpression,
    BitwiseNotExpression,
    LeftShiftExpression,
    RightShiftExpression,
    UnsignedRightShiftExpression,

    // Comparison
    EqualsExpression,
    NotEqualsExpression,
    LessThanExpression,
    LessThanOrEqualExpression,
    GreaterThanExpression,
    GreaterThanOrEqualExpression,
    IsExpression,
    IsPatternExpression,

    // Assignment
    SimpleAssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModuloAssignmentExpression,
    AndAssignmentExpression,
    OrAssignmentExpression,
    ExclusiveOrAssignmentExpression,
    LeftShiftAssignmentExpression,
    RightShiftAssignmentExpression,
    CoalesceAssignmentExpression,

    // Control flow
    Block,
    IfStatement,
    ElseClause,
    ConditionalExpression,
    SwitchStatement,
    SwitchSection,
    SwitchExpression,
    SwitchExpressionArm,
    ForStatement,
    WhileStatement,
    DoStatement,
    ForEachStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    YieldStatement,
    GotoStatement,
    ThrowStatement,
    ThrowExpression,
    TryStatement,
    CatchClause,
    FinallyClause,

    // Access
    InvocationExpression,
    MemberAccessExpression,
    ConditionalAccessExpression,
    MemberBindingExpression,
    ElementAccessExpression,
    ElementBindingExpression,

    // Creation
    ObjectCreationExpression,
    ImplicitObjectCreationExpression,
    ArrayCreationExpression,
    ImplicitArrayCreationExpression,
    InitializerExpression,

    // Type operations
    CastExpression,
    AsExpression,
    TypeOfExpression,
    SizeOfExpression,

    // Declarations
    MethodDeclaration,
    ConstructorDeclaration,
    LocalFunctionStatement,
    PropertyDeclaration,
    AccessorDeclaration,
    LocalDeclarationStatement,
    VariableDeclaration,
    VariableDeclarator,
    Parameter,
    LambdaExpression,
    AnonymousMethodExpression,

    // Structural
    CompilationUnit,
    NamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    RecordDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    ParameterList,
    ArgumentList,
    Argument,
    AttributeList,
    Attribute,
    TypeArgumentList,
    ArrayType,
    NullableType,
    TupleExpression,
    ParenthesizedExpression,
    AwaitExpression,
    Interpolation,
    UsingStatement,
    LockStatement,
    ExpressionStatement,
    ArrowExpressionClause,
    EqualsValueClause,
    Unknown,
}

impl SyntaxKind {
    /// Numeric code used by the fingerprint hash. Stable within a build.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn category(self) -> KindCategory {
        use KindCategory as C;
        use SyntaxKind as K;
        match self {
            K::IntegerLiteral | K::RealLiteral => C::NumericLiteral,
            K::StringLiteral | K::InterpolatedString => C::StringLiteral,
            K::CharacterLiteral => C::CharLiteral,
            K::BooleanLiteral => C::BoolLiteral,
            K::NullLiteral | K::DefaultLiteral => C::NullLiteral,

            K::Identifier | K::PredefinedType => C::SimpleIdentifier,
            K::QualifiedName => C::QualifiedIdentifier,
            K::GenericName => C::GenericIdentifier,
            K::ThisExpression | K::BaseExpression => C::ThisBaseIdentifier,

            K::AddExpression | K::SubtractExpression => C::AdditiveOp,
            K::MultiplyExpression | K::DivideExpression | K::ModuloExpression => {
                C::MultiplicativeOp
            }
            K::UnaryPlusExpression | K::UnaryMinusExpression => C::UnaryArithmeticOp,
            K::PreIncrementExpression
            | K::PreDecrementExpression
            | K::PostIncrementExpression
            | K::PostDecrementExpression => C::IncrementOp,

            K::LogicalAndExpression | K::LogicalOrExpression | K::CoalesceExpression => {
                C::BinaryLogicalOp
            }
            K::LogicalNotExpression => C::UnaryLogicalOp,
            K::BitwiseAndExpression | K::BitwiseOrExpression | K::ExclusiveOrExpression => {
                C::BinaryBitwiseOp
            }
            K::BitwiseNotExpression => C::UnaryBitwiseOp,
            K::LeftShiftExpression
            | K::RightShiftExpression
            | K::UnsignedRightShiftExpression => C::ShiftOp,

            K::EqualsExpression | K::NotEqualsExpression => C::EqualityOp,
            K::LessThanExpression
            | K::LessThanOrEqualExpression
            | K::GreaterThanExpression
            | K::GreaterThanOrEqualExpression => C::RelationalOp,
            K::IsExpression | K::IsPatternExpression => C::TypeCheckOp,

            K::SimpleAssignmentExpression => C::SimpleAssignment,
            K::AddAssignmentExpression
            | K::SubtractAssignmentExpression
            | K::MultiplyAssignmentExpression
            | K::DivideAssignmentExpression
            | K::ModuloAssignmentExpression
            | K::AndAssignmentExpression
            | K::OrAssignmentExpression
            | K::ExclusiveOrAssignmentExpression
            | K::LeftShiftAssignmentExpression
            | K::RightShiftAssignmentExpression
            | K::CoalesceAssignmentExpression => C::CompoundAssignment,

            K::ForStatement | K::WhileStatement | K::DoStatement | K::ForEachStatement => {
                C::LoopStatement
            }
            K::IfStatement | K::ConditionalExpression => C::ConditionalStatement,
            K::SwitchStatement
            | K::SwitchSection
            | K::SwitchExpression
            | K::SwitchExpressionArm => C::SwitchStatement,
            K::ElseClause => C::ElseClause,
            K::BreakStatement | K::ContinueStatement => C::LoopControl,
            K::ReturnStatement | K::YieldStatement => C::ReturnStatement,
            K::GotoStatement => C::GotoStatement,
            K::ThrowStatement
            | K::ThrowExpression
            | K::TryStatement
            | K::CatchClause
            | K::FinallyClause => C::ExceptionStatement,

            K::InvocationExpression => C::MethodInvocation,
            K::MemberAccessExpression
            | K::ConditionalAccessExpression
            | K::MemberBindingExpression => C::PropertyAccess,
            K::ElementAccessExpression | K::ElementBindingExpression => C::ElementAccess,
            K::ObjectCreationExpression | K::ImplicitObjectCreationExpression => {
                C::ObjectCreation
            }
            K::ArrayCreationExpression
            | K::ImplicitArrayCreationExpression
            | K::InitializerExpression => C::ArrayCreation,

            K::CastExpression | K::AsExpression | K::TypeOfExpression | K::SizeOfExpression => {
                C::TypeOperation
            }

            K::MethodDeclaration
            | K::ConstructorDeclaration
            | K::LocalFunctionStatement
            | K::PropertyDeclaration
            | K::AccessorDeclaration
            | K::LocalDeclarationStatement
            | K::VariableDeclaration
            | K::VariableDeclarator
            | K::Parameter
            | K::LambdaExpression
            | K::AnonymousMethodExpression => C::Declaration,

            K::Block
            | K::CompilationUnit
            | K::NamespaceDeclaration
            | K::ClassDeclaration
            | K::StructDeclaration
            | K::RecordDeclaration
            | K::InterfaceDeclaration
            | K::EnumDeclaration
            | K::ParameterList
            | K::ArgumentList
            | K::Argument
            | K::AttributeList
            | K::Attribute
            | K::TypeArgumentList
            | K::ArrayType
            | K::NullableType
            | K::TupleExpression
            | K::ParenthesizedExpression
            | K::AwaitExpression
            | K::Interpolation
            | K::UsingStatement
            | K::LockStatement
            | K::ExpressionStatement
            | K::ArrowExpressionClause
            | K::EqualsValueClause => C::Structural,

            K::Unknown => C::Unknown,
        }
    }
}

/// Semantic category of a raw kind. Order is load-bearing only for the packed
/// triangular distance table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KindCategory {
    NumericLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    NullLiteral,
    SimpleIdentifier,
    QualifiedIdentifier,
    GenericIdentifier,
    ThisBaseIdentifier,
    AdditiveOp,
    MultiplicativeOp,
    UnaryArithmeticOp,
    IncrementOp,
    BinaryLogicalOp,
    UnaryLogicalOp,
    BinaryBitwiseOp,
    UnaryBitwiseOp,
    ShiftOp,
    EqualityOp,
    RelationalOp,
    TypeCheckOp,
    SimpleAssignment,
    CompoundAssignment,
    LoopStatement,
    ConditionalStatement,
    SwitchStatement,
    ElseClause,
    LoopControl,
    ReturnStatement,
    GotoStatement,
    ExceptionStatement,
    MethodInvocation,
    PropertyAccess,
    ElementAccess,
    ObjectCreation,
    ArrayCreation,
    TypeOperation,
    Declaration,
    Structural,
    Unknown,
}

pub const CATEGORY_COUNT: usize = 40;

/// Calibrated near-distances, in hundredths. Every pair not listed here is
/// maximally distant (1.0).
const NEAR_PAIRS: &[(KindCategory, KindCategory, u8)] = &[
    // Literals
    (KindCategory::StringLiteral, KindCategory::CharLiteral, 10),
    (KindCategory::BoolLiteral, KindCategory::NullLiteral, 15),
    // Identifiers
    (KindCategory::SimpleIdentifier, KindCategory::QualifiedIdentifier, 5),
    (KindCategory::SimpleIdentifier, KindCategory::GenericIdentifier, 10),
    (KindCategory::QualifiedIdentifier, KindCategory::GenericIdentifier, 5),
    (KindCategory::SimpleIdentifier, KindCategory::ThisBaseIdentifier, 20),
    // Arithmetic
    (KindCategory::AdditiveOp, KindCategory::MultiplicativeOp, 10),
    (KindCategory::AdditiveOp, KindCategory::UnaryArithmeticOp, 15),
    (KindCategory::AdditiveOp, KindCategory::IncrementOp, 20),
    // Logical
    (KindCategory::BinaryLogicalOp, KindCategory::UnaryLogicalOp, 10),
    // Bitwise
    (KindCategory::BinaryBitwiseOp, KindCategory::UnaryBitwiseOp, 10),
    (KindCategory::BinaryBitwiseOp, KindCategory::ShiftOp, 15),
    // Comparison
    (KindCategory::EqualityOp, KindCategory::RelationalOp, 10),
    (KindCategory::EqualityOp, KindCategory::TypeCheckOp, 20),
    // Assignment
    (KindCategory::SimpleAssignment, KindCategory::CompoundAssignment, 10),
    // Control flow
    (KindCategory::LoopStatement, KindCategory::ConditionalStatement, 15),
    (KindCategory::ConditionalStatement, KindCategory::SwitchStatement, 10),
    (KindCategory::ConditionalStatement, KindCategory::ElseClause, 5),
    (KindCategory::LoopControl, KindCategory::ReturnStatement, 10),
    // Access
    (KindCategory::MethodInvocation, KindCategory::PropertyAccess, 10),
    (KindCategory::PropertyAccess, KindCategory::ElementAccess, 5),
    // Creation
    (KindCategory::ObjectCreation, KindCategory::ArrayCreation, 15),
    // Cross-category representatives
    (KindCategory::NumericLiteral, KindCategory::SimpleIdentifier, 40),
    (KindCategory::SimpleIdentifier, KindCategory::MethodInvocation, 30),
    (KindCategory::AdditiveOp, KindCategory::Declaration, 70),
    (KindCategory::LoopStatement, KindCategory::Declaration, 60),
    (KindCategory::NumericLiteral, KindCategory::Declaration, 80),
    (KindCategory::MethodInvocation, KindCategory::ObjectCreation, 25),
    (KindCategory::TypeOperation, KindCategory::Declaration, 40),
];

const TABLE_LEN: usize = CATEGORY_COUNT * (CATEGORY_COUNT + 1) / 2;

fn triangular_index(a: KindCategory, b: KindCategory) -> usize {
    let (lo, hi) = {
        let (x, y) = (a as usize, b as usize);
        if x <= y {
            (x, y)
        } else {
            (y, x)
        }
    };
    hi * (hi + 1) / 2 + lo
}

/// Packed lower-triangular table of distances in hundredths. Diagonal is 0,
/// listed pairs carry their calibrated value, everything else is 100.
static DISTANCE_TABLE: Lazy<[u8; TABLE_LEN]> = Lazy::new(|| {
    let mut table = [100u8; TABLE_LEN];
    for i in 0..CATEGORY_COUNT {
        table[i * (i + 1) / 2 + i] = 0;
    }
    for &(a, b, d) in NEAR_PAIRS {
        table[triangular_index(a, b)] = d;
    }
    table
});

/// Distance between two categories in [0, 1]. Symmetric, zero on the
/// diagonal.
pub fn category_distance(a: KindCategory, b: KindCategory) -> f64 {
    DISTANCE_TABLE[triangular_index(a, b)] as f64 * 0.01
}

/// Distance between two raw kinds: identical kinds are at distance zero,
/// otherwise the distance of their categories applies (which is still zero
/// for two different kinds sharing a category).
pub fn kind_distance(k1: SyntaxKind, k2: SyntaxKind) -> f64 {
    if k1 == k2 {
        0.0
    } else {
        category_distance(k1.category(), k2.category())
    }
}
