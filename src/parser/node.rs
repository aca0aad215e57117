//! Nodes, edges and graph elements.
//!
//! ```text
//! node     := '[' ('?' | '+' | '*') ']'
//!           | quantifier? '[' (member ':')? (marker ',')? content ']'
//! content  := expr structural? | structural | ε
//! element  := node (edge node)?
//! edge     := '<--' | '-->' | '<->' | '---'
//!           | ('<-' | '--') '[' (member ':')? expr? ']' ('->' | '--')
//! ```
//!
//! Two-character edge parts are not tokens of their own: `<-` is `<`
//! directly followed by `-`, and so on.

use crate::ast::{
    Cardinality, Edge, EdgeKind, EdgePart, Element, ElementKind, Expression, Node, NodeKind,
    Primary, ProperNode, Spanned, StructuralConstraint,
};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::error::ParseError;
use crate::parser::quantifier::QUANTIFIER_START;
use crate::parser::statement::STRUCTURAL_START;

/// Tokens that can start a node.
pub(super) const NODE_START: TokenSet =
    TokenSet::single(TokenKind::LBracket).union(QUANTIFIER_START);

const EDGE_GLYPHS: TokenSet = TokenSet::new(&[
    TokenKind::EdgeLeft,
    TokenKind::EdgeRight,
    TokenKind::EdgeBidirectional,
    TokenKind::EdgeUndirected,
]);

/// Body of a proper node after its label and marker.
struct NodeContent {
    constraint: Option<Expression>,
    children: Option<Box<StructuralConstraint>>,
}

impl<'a> Parser<'a> {
    pub(super) fn parse_node(&mut self) -> ParseResult<Node> {
        self.nested("node", |p| {
            if let Some(cardinality) = p.dummy_cardinality() {
                let start = p.stream.advance().span.start;
                p.stream.advance();
                let end = p.stream.advance().span.end;
                return Ok(Spanned::new(NodeKind::Dummy(cardinality), start..end));
            }

            let start = p.stream.current().span.start;
            let quantifier = if p.stream.check_any(QUANTIFIER_START) {
                Some(p.parse_quantifier()?)
            } else {
                None
            };

            p.stream.expect(TokenKind::LBracket)?;
            let label = p.parse_member_label()?;

            let marker = p.attempt("marker", |p| {
                let marker = p.parse_position_marker()?;
                p.stream.expect(TokenKind::Comma)?;
                Ok(marker)
            });
            let (marker, marker_error) = match marker {
                Ok(marker) => (Some(marker), None),
                Err(err) => (None, Some(err)),
            };

            let content = p
                .parse_node_content()
                .map_err(|err| ParseError::exhausted(err, marker_error))?;

            Ok(Spanned::new(
                NodeKind::Proper(ProperNode {
                    quantifier,
                    label,
                    marker,
                    constraint: content.constraint,
                    children: content.children,
                }),
                start..p.stream.previous_end(),
            ))
        })
    }

    fn dummy_cardinality(&self) -> Option<Cardinality> {
        if self.stream.peek_kind(0) != TokenKind::LBracket
            || self.stream.peek_kind(2) != TokenKind::RBracket
        {
            return None;
        }
        match self.stream.peek_kind(1) {
            TokenKind::Question => Some(Cardinality::Optional),
            TokenKind::Plus => Some(Cardinality::OneOrMore),
            TokenKind::Star => Some(Cardinality::ZeroOrMore),
            _ => None,
        }
    }

    /// Parses the node body and its closing `]`.
    ///
    /// A leading constraint is tried first. Once it parses and is followed by
    /// `]` or child nodes the parser commits to it, so the children are
    /// parsed at most once per node. Otherwise the body is parsed again as a
    /// bare structural constraint, which covers `[3 hits [a]]` and
    /// `[2..3 [a]]`.
    fn parse_node_content(&mut self) -> ParseResult<NodeContent> {
        if self.stream.consume(TokenKind::RBracket) {
            return Ok(NodeContent {
                constraint: None,
                children: None,
            });
        }

        let leading = self.attempt("node constraint", |p| {
            let constraint = p.parse_expression()?;
            // `3!` is a possessive count, not the constraint `3`.
            let possessive_count = p.stream.peek_kind(0) == TokenKind::Bang
                && matches!(constraint.node.as_primary(), Some(Primary::Integer(_)));
            if p.stream.check(TokenKind::RBracket)
                || (p.stream.check_any(STRUCTURAL_START) && !possessive_count)
            {
                Ok(constraint)
            } else {
                Err(p.stream.unexpected())
            }
        });

        match leading {
            Ok(constraint) => {
                let children = self.parse_optional_children()?;
                self.stream.expect(TokenKind::RBracket)?;
                Ok(NodeContent {
                    constraint: Some(constraint),
                    children,
                })
            }
            Err(constraint_error) => self
                .attempt("node children", |p| {
                    let children = p.parse_optional_children()?;
                    p.stream.expect(TokenKind::RBracket)?;
                    Ok(NodeContent {
                        constraint: None,
                        children,
                    })
                })
                .map_err(|err| ParseError::exhausted(err, Some(constraint_error))),
        }
    }

    fn parse_optional_children(&mut self) -> ParseResult<Option<Box<StructuralConstraint>>> {
        if self.stream.check_any(STRUCTURAL_START) {
            Ok(Some(Box::new(self.parse_structural_constraint()?)))
        } else {
            Ok(None)
        }
    }

    /// `node (edge node)?`
    pub(super) fn parse_element(&mut self) -> ParseResult<Element> {
        let source = self.parse_node()?;
        self.complete_element(source)
    }

    /// Finishes an element whose source node was already parsed.
    pub(super) fn complete_element(&mut self, source: Node) -> ParseResult<Element> {
        if !self.at_edge_start() {
            let span = source.span.clone();
            return Ok(Spanned::new(ElementKind::Content(source), span));
        }

        let edge = self.parse_edge()?;
        let target = self.parse_node()?;
        let span = source.span.start..target.span.end;
        Ok(Spanned::new(
            ElementKind::Connection {
                source,
                edge,
                target,
            },
            span,
        ))
    }

    /// Returns true if an edge glyph or a two-token edge part follows.
    pub(super) fn at_edge_start(&self) -> bool {
        self.stream.expect_at_current(EDGE_GLYPHS);
        let first = self.stream.peek_kind(0);
        if EDGE_GLYPHS.contains(first) {
            return true;
        }
        matches!(first, TokenKind::Lt | TokenKind::Minus)
            && self.stream.peek_kind(1) == TokenKind::Minus
            && self.stream.adjacent(1)
    }

    fn parse_edge(&mut self) -> ParseResult<Edge> {
        let start = self.stream.current().span.start;

        if let Some(glyph) = self.stream.consume_any(EDGE_GLYPHS) {
            let (left, right) = match glyph.kind {
                TokenKind::EdgeLeft => (EdgePart::Directed, EdgePart::Undirected),
                TokenKind::EdgeRight => (EdgePart::Undirected, EdgePart::Directed),
                TokenKind::EdgeBidirectional => (EdgePart::Directed, EdgePart::Directed),
                _ => (EdgePart::Undirected, EdgePart::Undirected),
            };
            return Ok(Spanned::new(EdgeKind::Empty { left, right }, glyph.span));
        }

        let left = self.parse_edge_part(TokenKind::Lt, TokenKind::Minus)?;
        self.stream.expect(TokenKind::LBracket)?;
        let label = self.parse_member_label()?;
        let constraint = if self.stream.check(TokenKind::RBracket) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.stream.expect(TokenKind::RBracket)?;
        let right = self.parse_edge_part(TokenKind::Minus, TokenKind::Gt)?;

        Ok(Spanned::new(
            EdgeKind::Filled {
                left,
                label,
                constraint,
                right,
            },
            start..self.stream.previous_end(),
        ))
    }

    /// Parses the directed part `head tail`, or `--`.
    fn parse_edge_part(&mut self, head: TokenKind, tail: TokenKind) -> ParseResult<EdgePart> {
        let directed = self.stream.check(head) && self.stream.peek_kind(1) == tail;
        let (part, head, tail) = if directed {
            (EdgePart::Directed, head, tail)
        } else {
            (EdgePart::Undirected, TokenKind::Minus, TokenKind::Minus)
        };

        self.stream.expect(head)?;
        if !self.stream.adjacent(0) || !self.stream.check(tail) {
            self.stream.expect_at_current(TokenSet::single(tail));
            return Err(self.stream.error_here(format!(
                "incomplete edge: expected `{tail}` directly after `{head}`"
            )));
        }
        self.stream.advance();
        Ok(part)
    }
}
