//! Expression AST nodes for IQL.
//!
//! This module defines the general expression language used inside node
//! constraints, filters, grouping and ordering clauses:
//! - Primaries (literals, references, list literals)
//! - Prefix forms (cast, wrapping, unary operators, `foreach` loops)
//! - Binary operator families, one enum per precedence band
//! - Postfix forms (path access, calls, list/annotation access, assignment,
//!   set predicates)
//! - The ternary conditional

use crate::ast::{Span, Spanned, span_insensitive_eq};
use smol_str::SmolStr;

// ============================================================================
// Expression - Top-level expression type
// ============================================================================

/// Any IQL expression, with the span it was parsed from.
pub type Expression = Spanned<ExpressionKind>;

/// The shape of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    /// Literal, reference or list literal
    Primary(Primary),

    /// `(type) expr`
    Cast(PrimitiveType, Box<Expression>),

    /// `(expr)`
    Wrapping(Box<Expression>),

    /// `NOT expr`, `!expr`, `-expr`, `~expr`
    Unary(UnaryOperator, Box<Expression>),

    /// `FOREACH ... END` loop used as a value
    ForEach(Box<LoopExpression>),

    /// `* / %`
    Multiplicative(MultiplicativeOperator, Box<Expression>, Box<Expression>),

    /// `+ -`
    Additive(AdditiveOperator, Box<Expression>, Box<Expression>),

    /// `& && ^ | << >>`
    Bitwise(BitwiseOperator, Box<Expression>, Box<Expression>),

    /// `< <= > >=`
    Comparison(ComparisonOperator, Box<Expression>, Box<Expression>),

    /// `=~ !~ =# !#`
    StringOp(StringOperator, Box<Expression>, Box<Expression>),

    /// `== !=`
    Equality(EqualityOperator, Box<Expression>, Box<Expression>),

    /// `AND`
    Conjunction(Box<Expression>, Box<Expression>),

    /// `OR` or `||`
    Disjunction(Box<Expression>, Box<Expression>),

    /// `element [ALL|*] [NOT|!] IN set`
    SetPredicate {
        element: Box<Expression>,
        set: Box<Expression>,
        all: bool,
        negated: bool,
    },

    /// `condition ? then : otherwise`
    Ternary {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },

    /// `expr.name`
    PathAccess(Box<Expression>, SmolStr),

    /// `name(args)`
    MethodInvocation(Box<Expression>, Vec<Expression>),

    /// `expr[args]`
    ListAccess(Box<Expression>, Vec<Expression>),

    /// `expr{args}`
    AnnotationAccess(Box<Expression>, Vec<Expression>),

    /// `expr AS [OPTIONAL] target`
    Assignment {
        source: Box<Expression>,
        optional: bool,
        target: AssignmentTarget,
    },
}

impl ExpressionKind {
    /// Wraps this kind into an [`Expression`] with the given span.
    pub fn at(self, span: Span) -> Expression {
        Spanned::new(self, span)
    }

    /// Returns the primary value if this is a primary expression.
    pub fn as_primary(&self) -> Option<&Primary> {
        match self {
            ExpressionKind::Primary(primary) => Some(primary),
            _ => None,
        }
    }
}

// ============================================================================
// Primaries
// ============================================================================

/// Literal and reference primaries.
///
/// Numeric literals preserve their original source digits, including `_`
/// separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// NULL
    Null,
    /// TRUE or FALSE
    Boolean(bool),
    /// Unsigned integer digits
    Integer(SmolStr),
    /// Unsigned floating point, `digits.digits`
    Float(SmolStr),
    /// Decoded string literal contents
    String(SmolStr),
    /// `type[] { ... }` or `{ ... }`
    List(ListLiteral),
    /// `@name`
    Variable(SmolStr),
    /// `$name`
    Member(SmolStr),
    /// `namespace::name`
    QualifiedIdentifier(SmolStr, SmolStr),
    /// A bare identifier
    Identifier(SmolStr),
}

/// A list literal with an optional element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLiteral {
    pub element_type: Option<PrimitiveType>,
    pub items: Vec<Expression>,
}

/// Type names usable in casts and typed list literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    String,
    Int,
    Long,
    Float,
    Double,
}

/// Target of an `AS` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentTarget {
    Variable(SmolStr),
    Member(SmolStr),
}

// ============================================================================
// Operators
// ============================================================================

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Logical negation (NOT or !)
    Not,
    /// Arithmetic negation (-)
    Minus,
    /// Bitwise complement (~)
    BitwiseNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOperator {
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOperator {
    Add,
    Subtract,
}

/// Operators sharing the bitwise precedence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOperator {
    /// `&`
    And,
    /// `&&`
    DoubleAnd,
    /// `^`
    Xor,
    /// `|`
    Or,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

/// Regex match and substring containment, positive and negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOperator {
    /// `=~`
    Matches,
    /// `!~`
    NotMatches,
    /// `=#`
    Contains,
    /// `!#`
    NotContains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOperator {
    Equal,
    NotEqual,
}

// ============================================================================
// Loops
// ============================================================================

/// `FOREACH source AS @variable <control> [COUNT counters]`
#[derive(Debug, Clone)]
pub struct LoopExpression {
    pub source: Expression,
    pub variable: SmolStr,
    pub control: LoopControl,
    /// Counters from the trailing `COUNT` clause; empty when absent.
    pub counters: Vec<Counter>,
    pub span: Span,
}

span_insensitive_eq!(LoopExpression {
    source,
    variable,
    control,
    counters
});

/// Optional loop clauses, which must appear in this order and end with `END`.
#[derive(Debug, Clone)]
pub struct LoopControl {
    pub parity: Option<Parity>,
    /// `OMIT constraint`
    pub omit: Option<Expression>,
    /// `RANGE (lower, upper)`
    pub range: Option<BoundedRange>,
    /// `STEP (lower, upper)`
    pub step: Option<BoundedRange>,
    /// `DO constraint`
    pub action: Option<Expression>,
    pub span: Span,
}

span_insensitive_eq!(LoopControl {
    parity,
    omit,
    range,
    step,
    action
});

impl LoopControl {
    /// Returns true if no optional clause is present.
    pub fn is_empty(&self) -> bool {
        self.parity.is_none()
            && self.omit.is_none()
            && self.range.is_none()
            && self.step.is_none()
            && self.action.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

/// `(lower, upper)`
#[derive(Debug, Clone)]
pub struct BoundedRange {
    pub lower: Expression,
    pub upper: Expression,
    pub span: Span,
}

span_insensitive_eq!(BoundedRange { lower, upper });

/// `constraint AS @variable` inside a `COUNT` clause.
#[derive(Debug, Clone)]
pub struct Counter {
    pub constraint: Expression,
    pub variable: SmolStr,
    pub span: Span,
}

span_insensitive_eq!(Counter {
    constraint,
    variable
});
