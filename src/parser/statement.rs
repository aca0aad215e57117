//! Node statements and structural constraints.
//!
//! ```text
//! structural := (digits HITS | FIRST)? flag* statement+
//! statement  := statement (OR | '||') statement
//!             | quantifier? '{' statement+ '}'
//!             | (UNORDERED | ORDERED | ADJACENT)+ statement+
//!             | element (',' element)*
//!             | node
//! ```
//!
//! A node directly followed by an edge or a comma starts a graph fragment;
//! otherwise it stands alone.

use crate::ast::{
    HitsLimitKind, MatchFlag, NodeArrangement, NodeStatement, NodeStatementKind, Spanned,
    StructuralConstraint,
};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::node::NODE_START;
use crate::parser::quantifier::QUANTIFIER_START;

const ARRANGEMENTS: TokenSet =
    TokenSet::new(&[TokenKind::Unordered, TokenKind::Ordered, TokenKind::Adjacent]);

const MATCH_FLAGS: TokenSet = TokenSet::new(&[
    TokenKind::Disjoint,
    TokenKind::Consecutive,
    TokenKind::Reverse,
    TokenKind::Rooted,
]);

const STATEMENT_OR: TokenSet = TokenSet::new(&[TokenKind::Or, TokenKind::DoublePipe]);

/// Tokens that can start a node statement.
pub(super) const NODE_STATEMENT_START: TokenSet = NODE_START
    .union(ARRANGEMENTS)
    .union(TokenSet::single(TokenKind::LBrace));

/// Tokens that can start a structural constraint.
pub(super) const STRUCTURAL_START: TokenSet = NODE_STATEMENT_START
    .union(MATCH_FLAGS)
    .union(TokenSet::single(TokenKind::First));

const DISJUNCTION: u8 = 1;

impl<'a> Parser<'a> {
    pub(super) fn parse_structural_constraint(&mut self) -> ParseResult<StructuralConstraint> {
        self.nested("structural constraint", |p| {
            let start = p.stream.current().span.start;

            let hits_limit = if p.stream.check(TokenKind::First) {
                let token = p.stream.advance();
                Some(Spanned::new(HitsLimitKind::First, token.span))
            } else if p.stream.check(TokenKind::PureDigits)
                && p.stream.peek_kind(1) == TokenKind::Hits
            {
                let limit = p.stream.advance();
                let hits = p.stream.advance();
                Some(Spanned::new(
                    HitsLimitKind::Hits(limit.text),
                    limit.span.start..hits.span.end,
                ))
            } else {
                None
            };

            let mut flags = Vec::new();
            while let Some(token) = p.stream.consume_any(MATCH_FLAGS) {
                flags.push(match token.kind {
                    TokenKind::Disjoint => MatchFlag::Disjoint,
                    TokenKind::Consecutive => MatchFlag::Consecutive,
                    TokenKind::Reverse => MatchFlag::Reverse,
                    _ => MatchFlag::Rooted,
                });
            }

            let statements = p.parse_node_statements()?;

            Ok(StructuralConstraint {
                hits_limit,
                flags,
                statements,
                span: start..p.stream.previous_end(),
            })
        })
    }

    /// One or more node statements.
    fn parse_node_statements(&mut self) -> ParseResult<Vec<NodeStatement>> {
        let mut statements = vec![self.parse_node_statement()?];
        while self.stream.check_any(NODE_STATEMENT_START) {
            statements.push(self.parse_node_statement()?);
        }
        Ok(statements)
    }

    pub(super) fn parse_node_statement(&mut self) -> ParseResult<NodeStatement> {
        self.parse_node_statement_bp(0)
    }

    fn parse_node_statement_bp(&mut self, min_precedence: u8) -> ParseResult<NodeStatement> {
        self.nested("node statement", |p| {
            let mut lhs = p.parse_node_statement_prefix()?;

            while DISJUNCTION >= min_precedence && p.stream.check_any(STATEMENT_OR) {
                p.stream.advance();
                let rhs = p.parse_node_statement_bp(DISJUNCTION + 1)?;
                let span = lhs.span.start..rhs.span.end;
                lhs = Spanned::new(
                    NodeStatementKind::Disjunction(Box::new(lhs), Box::new(rhs)),
                    span,
                );
            }

            Ok(lhs)
        })
    }

    fn parse_node_statement_prefix(&mut self) -> ParseResult<NodeStatement> {
        let start = self.stream.current().span.start;

        let kind = if self.stream.check_any(ARRANGEMENTS) {
            let mut arrangements = Vec::new();
            while let Some(token) = self.stream.consume_any(ARRANGEMENTS) {
                arrangements.push(match token.kind {
                    TokenKind::Unordered => NodeArrangement::Unordered,
                    TokenKind::Ordered => NodeArrangement::Ordered,
                    _ => NodeArrangement::Adjacent,
                });
            }
            let statements = self.parse_node_statements()?;
            NodeStatementKind::Sequence {
                arrangements,
                statements,
            }
        } else if self.stream.check(TokenKind::LBrace) || self.at_quantified_grouping() {
            let quantifier = if self.stream.check_any(QUANTIFIER_START) {
                Some(self.parse_quantifier()?)
            } else {
                None
            };
            self.stream.expect(TokenKind::LBrace)?;
            let statements = self.parse_node_statements()?;
            self.stream.expect(TokenKind::RBrace)?;
            NodeStatementKind::Grouping {
                quantifier,
                statements,
            }
        } else {
            let node = self.parse_node()?;
            if self.at_edge_start() || self.stream.check(TokenKind::Comma) {
                let mut elements = vec![self.complete_element(node)?];
                while self.stream.consume(TokenKind::Comma) {
                    elements.push(self.parse_element()?);
                }
                NodeStatementKind::GraphFragment(elements)
            } else {
                NodeStatementKind::SingleNode(node)
            }
        };

        Ok(Spanned::new(kind, start..self.stream.previous_end()))
    }

    /// Returns true if a quantifier followed by `{` comes next.
    fn at_quantified_grouping(&mut self) -> bool {
        if !self.stream.check_any(QUANTIFIER_START) {
            return false;
        }
        self.lookahead(|p| {
            p.parse_quantifier().is_ok() && p.stream.peek_kind(0) == TokenKind::LBrace
        })
    }
}
