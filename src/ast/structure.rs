//! Structural pattern AST nodes: node statements, nodes, edges, position
//! markers and quantifiers.

use crate::ast::{Expression, Span, Spanned, span_insensitive_eq};
use smol_str::SmolStr;

// ============================================================================
// Structural constraints
// ============================================================================

/// `hitsLimit? matchFlag* nodeStatement+`
#[derive(Debug, Clone)]
pub struct StructuralConstraint {
    pub hits_limit: Option<HitsLimit>,
    /// Flags in source order. Duplicates are kept.
    pub flags: Vec<MatchFlag>,
    pub statements: Vec<NodeStatement>,
    pub span: Span,
}

span_insensitive_eq!(StructuralConstraint {
    hits_limit,
    flags,
    statements
});

pub type HitsLimit = Spanned<HitsLimitKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitsLimitKind {
    /// `n HITS`
    Hits(SmolStr),
    /// `FIRST`
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFlag {
    Disjoint,
    Consecutive,
    Reverse,
    Rooted,
}

// ============================================================================
// Node statements
// ============================================================================

pub type NodeStatement = Spanned<NodeStatementKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatementKind {
    /// `quantifier? { nodeStatement+ }`
    Grouping {
        quantifier: Option<Quantifier>,
        statements: Vec<NodeStatement>,
    },
    /// `(ORDERED|UNORDERED|ADJACENT)+ nodeStatement+`
    Sequence {
        arrangements: Vec<NodeArrangement>,
        statements: Vec<NodeStatement>,
    },
    SingleNode(Node),
    /// Comma-separated elements, at least one of which is usually an edge
    GraphFragment(Vec<Element>),
    /// `left or right`
    Disjunction(Box<NodeStatement>, Box<NodeStatement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeArrangement {
    Unordered,
    Ordered,
    Adjacent,
}

// ============================================================================
// Nodes
// ============================================================================

pub type Node = Spanned<NodeKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `[?]`, `[+]` or `[*]`
    Dummy(Cardinality),
    Proper(ProperNode),
}

/// Cardinality of a dummy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// `?`
    Optional,
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
}

/// `quantifier? [ ($label:)? (marker,)? constraint? children? ]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProperNode {
    pub quantifier: Option<Quantifier>,
    /// Member label without the `$` sigil
    pub label: Option<SmolStr>,
    pub marker: Option<PositionMarker>,
    pub constraint: Option<Expression>,
    /// Nested structural constraint
    pub children: Option<Box<StructuralConstraint>>,
}

// ============================================================================
// Elements and edges
// ============================================================================

pub type Element = Spanned<ElementKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A lone node inside a graph fragment
    Content(Node),
    /// `source edge target`
    Connection {
        source: Node,
        edge: Edge,
        target: Node,
    },
}

pub type Edge = Spanned<EdgeKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// One of the glyphs `<--`, `-->`, `<->` or `---`
    Empty { left: EdgePart, right: EdgePart },
    /// `leftPart [ ($label:)? constraint? ] rightPart`
    Filled {
        left: EdgePart,
        label: Option<SmolStr>,
        constraint: Option<Expression>,
        right: EdgePart,
    },
}

impl EdgeKind {
    pub fn left(&self) -> EdgePart {
        match self {
            EdgeKind::Empty { left, .. } | EdgeKind::Filled { left, .. } => *left,
        }
    }

    pub fn right(&self) -> EdgePart {
        match self {
            EdgeKind::Empty { right, .. } | EdgeKind::Filled { right, .. } => *right,
        }
    }
}

/// One end of an edge: with an arrow head (`<-`, `->`) or without (`--`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgePart {
    Directed,
    Undirected,
}

// ============================================================================
// Position markers
// ============================================================================

pub type PositionMarker = Spanned<PositionMarkerKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionMarkerKind {
    /// `name` or `name(arg, ...)`
    Call {
        name: SmolStr,
        arguments: Vec<PositionArgument>,
    },
    /// `(marker)`
    Wrapping(Box<PositionMarker>),
    Conjunction(Box<PositionMarker>, Box<PositionMarker>),
    Disjunction(Box<PositionMarker>, Box<PositionMarker>),
}

/// A signed numeric marker argument. The text includes a leading `-` when
/// negative; a leading `+` is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionArgument {
    Integer(SmolStr),
    Float(SmolStr),
}

// ============================================================================
// Quantifiers
// ============================================================================

/// `simple (| simple)*`, optionally wrapped in `< ... >`.
#[derive(Debug, Clone)]
pub struct Quantifier {
    /// Never empty.
    pub alternatives: Vec<SimpleQuantifier>,
    /// True when the group was wrapped in `< ... >`.
    pub bounded: bool,
    pub span: Span,
}

span_insensitive_eq!(Quantifier {
    alternatives,
    bounded
});

impl Quantifier {
    /// Returns the only alternative of an unwrapped single quantifier.
    pub fn as_simple(&self) -> Option<&SimpleQuantifier> {
        match self.alternatives.as_slice() {
            [single] if !self.bounded => Some(single),
            _ => None,
        }
    }
}

pub type SimpleQuantifier = Spanned<SimpleQuantifierKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleQuantifierKind {
    /// `NOT` or `!`
    Not,
    /// `ALL` or `*`, with `?` (reluctant) or `+` (possessive)
    All(QuantifierMode),
    /// `n`, `n+`, `n-` with optional `?`/`!` and `^`
    Fixed {
        value: SmolStr,
        sign: Option<QuantifierSign>,
        mode: QuantifierMode,
        discontinuous: bool,
    },
    /// `low..high` with optional `?`/`!` and `^`
    Range {
        low: SmolStr,
        high: SmolStr,
        mode: QuantifierMode,
        discontinuous: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantifierMode {
    #[default]
    Greedy,
    Reluctant,
    Possessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantifierSign {
    /// `n+`
    AtLeast,
    /// `n-`
    AtMost,
}
