//! Structural Pattern Tests
//!
//! Node statements, nodes, edges, position markers and quantifiers as they
//! appear inside structural constraints.

mod common;

use common::{node_statement, statement_error, structural};
use iql_parser::ParseErrorKind;
use iql_parser::TokenKind;
use iql_parser::ast::{
    Cardinality, EdgeKind, EdgePart, ElementKind, NodeKind, NodeStatementKind, PositionArgument,
    PositionMarkerKind, ProperNode, QuantifierMode, QuantifierSign, SimpleQuantifierKind,
};

fn proper(source: &str) -> ProperNode {
    match node_statement(source).node {
        NodeStatementKind::SingleNode(node) => match node.node {
            NodeKind::Proper(node) => node,
            other => panic!("expected proper node, got {other:?}"),
        },
        other => panic!("expected single node, got {other:?}"),
    }
}

fn quantifier_of(source: &str) -> SimpleQuantifierKind {
    let node = proper(source);
    let quantifier = node.quantifier.expect("quantifier");
    quantifier.as_simple().expect("single quantifier").node.clone()
}

// ===== Nodes =====

#[test]
fn node_parts() {
    let node = proper("[$x: isFirst, pos == \"NN\"]");
    assert_eq!(node.label.as_deref(), Some("x"));
    assert!(matches!(
        node.marker.map(|m| m.node),
        Some(PositionMarkerKind::Call { ref name, .. }) if name == "isFirst"
    ));
    assert!(node.constraint.is_some());
    assert!(node.children.is_none());
}

#[test]
fn empty_and_dummy_nodes() {
    assert_eq!(proper("[]"), ProperNode::default());

    for (source, cardinality) in [
        ("[?]", Cardinality::Optional),
        ("[+]", Cardinality::OneOrMore),
        ("[*]", Cardinality::ZeroOrMore),
    ] {
        let NodeStatementKind::SingleNode(node) = node_statement(source).node else {
            panic!("expected single node for {source}");
        };
        assert_eq!(node.node, NodeKind::Dummy(cardinality));
    }
}

#[test]
fn constraint_and_children() {
    let node = proper("[$s: len > 3 [$a: pos == \"DET\"] [$b:]]");
    assert!(node.constraint.is_some());
    assert_eq!(node.children.map(|c| c.statements.len()), Some(2));

    let node = proper("[[a] [b]]");
    assert!(node.constraint.is_none());
    assert_eq!(node.children.map(|c| c.statements.len()), Some(2));
}

#[test]
fn marker_combinations() {
    let node = proper("[isAt(-1) and (isFirst or isLast), x]");
    let Some(marker) = node.marker else {
        panic!("expected marker");
    };
    let PositionMarkerKind::Conjunction(lhs, rhs) = marker.node else {
        panic!("expected conjunction");
    };
    let PositionMarkerKind::Call { arguments, .. } = lhs.node else {
        panic!("expected call");
    };
    assert_eq!(arguments, vec![PositionArgument::Integer("-1".into())]);
    assert!(matches!(rhs.node, PositionMarkerKind::Wrapping(_)));
}

#[test]
fn marker_float_argument() {
    let node = proper("[isInside(0.25, +0.75), x]");
    let Some(PositionMarkerKind::Call { arguments, .. }) = node.marker.map(|m| m.node) else {
        panic!("expected call");
    };
    assert_eq!(
        arguments,
        vec![
            PositionArgument::Float("0.25".into()),
            PositionArgument::Float("0.75".into()),
        ]
    );
}

// ===== Quantifiers =====

#[test]
fn quantifier_forms() {
    assert_eq!(
        quantifier_of("3 [a]"),
        SimpleQuantifierKind::Fixed {
            value: "3".into(),
            sign: None,
            mode: QuantifierMode::Greedy,
            discontinuous: false,
        }
    );
    assert_eq!(
        quantifier_of("3..5 [a]"),
        SimpleQuantifierKind::Range {
            low: "3".into(),
            high: "5".into(),
            mode: QuantifierMode::Greedy,
            discontinuous: false,
        }
    );
    assert_eq!(
        quantifier_of("3..5! [a]"),
        SimpleQuantifierKind::Range {
            low: "3".into(),
            high: "5".into(),
            mode: QuantifierMode::Possessive,
            discontinuous: false,
        }
    );
    assert_eq!(
        quantifier_of("*? [a]"),
        SimpleQuantifierKind::All(QuantifierMode::Reluctant)
    );
    assert_eq!(
        quantifier_of("2-^ [a]"),
        SimpleQuantifierKind::Fixed {
            value: "2".into(),
            sign: Some(QuantifierSign::AtMost),
            mode: QuantifierMode::Greedy,
            discontinuous: true,
        }
    );
    assert_eq!(quantifier_of("! [a]"), SimpleQuantifierKind::Not);
}

#[test]
fn bounded_quantifier_group() {
    let node = proper("<1|3..4> [a]");
    let quantifier = node.quantifier.expect("quantifier");
    assert!(quantifier.bounded);
    assert_eq!(quantifier.alternatives.len(), 2);
    assert!(quantifier.as_simple().is_none());
}

#[test]
fn unclosed_bounded_quantifier() {
    let err = statement_error("<1|2 [a]");
    assert_eq!(err.found, TokenKind::LBracket);
    assert!(err.expected.contains(TokenKind::Gt));
}

// ===== Node statements =====

#[test]
fn structural_disjunction() {
    let NodeStatementKind::Disjunction(lhs, rhs) = node_statement("[a] or [b]").node else {
        panic!("expected disjunction");
    };
    assert_eq!(*lhs, node_statement("[a]"));
    assert_eq!(*rhs, node_statement("[b]"));
}

#[test]
fn sequence_and_grouping() {
    let NodeStatementKind::Sequence {
        arrangements,
        statements,
    } = node_statement("unordered [a] 2..3 {[b] [c]}").node
    else {
        panic!("expected sequence");
    };
    assert_eq!(arrangements.len(), 1);
    assert_eq!(statements.len(), 2);
    assert!(matches!(
        statements[1].node,
        NodeStatementKind::Grouping {
            quantifier: Some(_),
            ..
        }
    ));
}

#[test]
fn constraint_structure() {
    let constraint = structural("10 hits consecutive [$x:] --> [$y:] or [z]");
    assert_eq!(constraint.flags.len(), 1);
    assert_eq!(constraint.statements.len(), 1);
    assert!(matches!(
        constraint.statements[0].node,
        NodeStatementKind::Disjunction(..)
    ));
}

// ===== Edges =====

#[test]
fn edge_glyphs() {
    for (source, left, right) in [
        ("[a] --> [b]", EdgePart::Undirected, EdgePart::Directed),
        ("[a] <-- [b]", EdgePart::Directed, EdgePart::Undirected),
        ("[a] <-> [b]", EdgePart::Directed, EdgePart::Directed),
        ("[a] --- [b]", EdgePart::Undirected, EdgePart::Undirected),
    ] {
        let NodeStatementKind::GraphFragment(elements) = node_statement(source).node else {
            panic!("expected fragment for {source}");
        };
        let ElementKind::Connection { edge, .. } = &elements[0].node else {
            panic!("expected connection for {source}");
        };
        assert_eq!((edge.node.left(), edge.node.right()), (left, right), "{source}");
        assert_eq!(edge.span, 4..7, "{source}");
    }
}

#[test]
fn filled_edge() {
    let NodeStatementKind::GraphFragment(elements) =
        node_statement("[a] <-[$e: type == \"nsubj\"]-- [b], [c]").node
    else {
        panic!("expected fragment");
    };
    assert_eq!(elements.len(), 2);
    let ElementKind::Connection { edge, .. } = &elements[0].node else {
        panic!("expected connection");
    };
    let EdgeKind::Filled {
        left,
        label,
        constraint,
        right,
    } = &edge.node
    else {
        panic!("expected filled edge");
    };
    assert_eq!(*left, EdgePart::Directed);
    assert_eq!(label.as_deref(), Some("e"));
    assert!(constraint.is_some());
    assert_eq!(*right, EdgePart::Undirected);
}

#[test]
fn split_edge_head_is_rejected() {
    let err = statement_error("[a] <-[x]- > [b]");
    assert!(err.message.contains("incomplete edge"), "{}", err.message);
}

// ===== Failures =====

#[test]
fn unterminated_node() {
    let err = statement_error("[a");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert!(err.expected.contains(TokenKind::RBracket));
}

#[test]
fn dangling_edge() {
    let err = statement_error("[a] -->");
    assert!(err.is_eof());
}

#[test]
fn reparsing_yields_equal_trees() {
    let sources = [
        "[$x: isFirst, pos == \"NN\"] --> 2+ [$y:]",
        "adjacent {[a] or [b]} [*]",
        "<*|3> {[a] <-[l]-> [b]}",
    ];
    for source in sources {
        assert_eq!(node_statement(source), node_statement(source), "{source}");
    }
}
