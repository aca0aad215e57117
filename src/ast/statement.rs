//! Top-level statements: payload, selection, bindings, lanes, grouping and
//! result shaping.

use crate::ast::{Expression, Span, Spanned, StructuralConstraint, span_insensitive_eq};
use smol_str::SmolStr;

// ============================================================================
// Payload
// ============================================================================

pub type PayloadStatement = Spanned<PayloadStatementKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadStatementKind {
    /// `ALL`
    All,
    /// `[WITH bindings] [FILTER BY constraint] FIND selection`
    Query {
        bindings: Vec<Binding>,
        filter: Option<Expression>,
        selection: SelectionStatement,
    },
}

/// `[DISTINCT|EDGES] $m1, $m2 FROM layer`
#[derive(Debug, Clone)]
pub struct Binding {
    pub modifier: Option<BindingModifier>,
    /// Member names without the `$` sigil. Never empty.
    pub members: Vec<SmolStr>,
    /// Identifier of the source layer
    pub source: SmolStr,
    pub span: Span,
}

span_insensitive_eq!(Binding {
    modifier,
    members,
    source
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingModifier {
    Distinct,
    Edges,
}

// ============================================================================
// Selection
// ============================================================================

pub type SelectionStatement = Spanned<SelectionStatementKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStatementKind {
    /// A plain constraint spanning the whole selection
    Constraint(Expression),
    Structural {
        constraint: StructuralConstraint,
        having: Option<Expression>,
    },
    Lanes {
        lanes: Vec<LaneStatement>,
        having: Option<Expression>,
    },
}

/// `LANE name [AS $alias] structuralConstraint`
#[derive(Debug, Clone)]
pub struct LaneStatement {
    pub name: SmolStr,
    pub alias: Option<SmolStr>,
    pub constraint: StructuralConstraint,
    pub span: Span,
}

span_insensitive_eq!(LaneStatement {
    name,
    alias,
    constraint
});

// ============================================================================
// Grouping
// ============================================================================

/// `GROUP groupExpression (, groupExpression)*`
#[derive(Debug, Clone)]
pub struct GroupStatement {
    pub expressions: Vec<GroupExpression>,
    pub span: Span,
}

span_insensitive_eq!(GroupStatement { expressions });

/// `BY selector [FILTER ON filter] LABEL "label" [DEFAULT value]`
#[derive(Debug, Clone)]
pub struct GroupExpression {
    pub selector: Expression,
    pub filter: Option<Expression>,
    pub label: SmolStr,
    pub default: Option<Expression>,
    pub span: Span,
}

span_insensitive_eq!(GroupExpression {
    selector,
    filter,
    label,
    default
});

// ============================================================================
// Result
// ============================================================================

/// `[LIMIT [FIRST] n] [ORDER BY orderExpression, ...]`
#[derive(Debug, Clone)]
pub struct ResultStatement {
    pub limit: Option<ResultLimit>,
    /// Empty when no `ORDER BY` clause is present.
    pub order: Vec<OrderExpression>,
    pub span: Span,
}

span_insensitive_eq!(ResultStatement { limit, order });

#[derive(Debug, Clone)]
pub struct ResultLimit {
    pub first: bool,
    pub value: SmolStr,
    pub span: Span,
}

span_insensitive_eq!(ResultLimit { first, value });

#[derive(Debug, Clone)]
pub struct OrderExpression {
    pub expression: Expression,
    pub direction: SortDirection,
    pub span: Span,
}

span_insensitive_eq!(OrderExpression {
    expression,
    direction
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}
