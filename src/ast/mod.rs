//! AST foundation types and node structures.

pub mod expression;
mod span;
pub mod statement;
pub mod structure;

// Re-export span types
pub use span::{Span, Spanned};
pub(crate) use span::span_insensitive_eq;

pub use expression::{
    AdditiveOperator, AssignmentTarget, BitwiseOperator, BoundedRange, ComparisonOperator,
    Counter, EqualityOperator, Expression, ExpressionKind, ListLiteral, LoopControl,
    LoopExpression, MultiplicativeOperator, Parity, Primary, PrimitiveType, StringOperator,
    UnaryOperator,
};
pub use statement::{
    Binding, BindingModifier, GroupExpression, GroupStatement, LaneStatement, OrderExpression,
    PayloadStatement, PayloadStatementKind, ResultLimit, ResultStatement, SelectionStatement,
    SelectionStatementKind, SortDirection,
};
pub use structure::{
    Cardinality, Edge, EdgeKind, EdgePart, Element, ElementKind, HitsLimit, HitsLimitKind,
    MatchFlag, Node, NodeArrangement, NodeKind, NodeStatement, NodeStatementKind, PositionArgument,
    PositionMarker, PositionMarkerKind, ProperNode, Quantifier, QuantifierMode, QuantifierSign,
    SimpleQuantifier, SimpleQuantifierKind, StructuralConstraint,
};
