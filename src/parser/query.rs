//! Top-level statements: payload, selection, grouping and result shaping.
//!
//! ```text
//! payload    := ALL | (WITH binding (AND binding)*)? (FILTER BY expr)? FIND selection
//! binding    := (DISTINCT | EDGES)? member (',' member)* FROM Identifier
//! selection  := expr
//!             | (structural | lane (AND lane)*) (HAVING expr)?
//! lane       := LANE Identifier (AS member)? structural
//! group      := GROUP groupExpr (',' groupExpr)*
//! groupExpr  := BY expr (FILTER ON expr)? LABEL StringLiteral (DEFAULT expr)?
//! result     := (LIMIT FIRST? digits)? (ORDER BY orderExpr (',' orderExpr)*)?
//! orderExpr  := expr (ASC | DESC)
//! ```

use crate::ast::{
    Binding, BindingModifier, Expression, GroupExpression, GroupStatement, LaneStatement,
    OrderExpression, PayloadStatement, PayloadStatementKind, ResultLimit, ResultStatement,
    SelectionStatement, SelectionStatementKind, SortDirection, Spanned,
};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::error::ParseError;

const BINDING_MODIFIERS: TokenSet = TokenSet::new(&[TokenKind::Distinct, TokenKind::Edges]);
const SORT_DIRECTIONS: TokenSet = TokenSet::new(&[TokenKind::Asc, TokenKind::Desc]);

impl<'a> Parser<'a> {
    // ========================================================================
    // Payload
    // ========================================================================

    pub(super) fn parse_payload(&mut self) -> ParseResult<PayloadStatement> {
        self.nested("payload", |p| {
            let start = p.stream.current().span.start;

            if p.stream.check(TokenKind::All) && p.stream.peek_kind(1) == TokenKind::Eof {
                let token = p.stream.advance();
                return Ok(Spanned::new(PayloadStatementKind::All, token.span));
            }

            let mut bindings = Vec::new();
            if p.stream.consume(TokenKind::With) {
                bindings.push(p.parse_binding()?);
                while p.stream.consume(TokenKind::And) {
                    bindings.push(p.parse_binding()?);
                }
            }

            let filter = if p.stream.consume(TokenKind::Filter) {
                p.stream.expect(TokenKind::By)?;
                Some(p.parse_expression()?)
            } else {
                None
            };

            p.stream.expect(TokenKind::Find)?;
            let selection = p.parse_selection_statement()?;

            Ok(Spanned::new(
                PayloadStatementKind::Query {
                    bindings,
                    filter,
                    selection,
                },
                start..p.stream.previous_end(),
            ))
        })
    }

    fn parse_binding(&mut self) -> ParseResult<Binding> {
        let start = self.stream.current().span.start;

        let modifier = self
            .stream
            .consume_any(BINDING_MODIFIERS)
            .map(|token| match token.kind {
                TokenKind::Distinct => BindingModifier::Distinct,
                _ => BindingModifier::Edges,
            });

        let mut members = vec![self.parse_member()?.node];
        while self.stream.consume(TokenKind::Comma) {
            members.push(self.parse_member()?.node);
        }

        self.stream.expect(TokenKind::From)?;
        let source = self.parse_identifier()?.node;

        Ok(Binding {
            modifier,
            members,
            source,
            span: start..self.stream.previous_end(),
        })
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// A plain constraint is only accepted when nothing follows it; any
    /// other input is parsed as a structural or lane selection.
    pub(super) fn parse_selection_statement(&mut self) -> ParseResult<SelectionStatement> {
        self.nested("selection", |p| {
            let start = p.stream.current().span.start;

            let constraint = p.attempt("selection constraint", |p| {
                let constraint = p.parse_expression()?;
                p.stream.expect(TokenKind::Eof)?;
                Ok(constraint)
            });
            let constraint_error = match constraint {
                Ok(constraint) => {
                    return Ok(Spanned::new(
                        SelectionStatementKind::Constraint(constraint),
                        start..p.stream.previous_end(),
                    ));
                }
                Err(err) => err,
            };

            let kind = p
                .attempt("structural selection", Self::parse_structural_selection)
                .map_err(|err| ParseError::exhausted(err, Some(constraint_error)))?;
            Ok(Spanned::new(kind, start..p.stream.previous_end()))
        })
    }

    fn parse_structural_selection(&mut self) -> ParseResult<SelectionStatementKind> {
        if self.stream.check(TokenKind::Lane) {
            let mut lanes = vec![self.parse_lane()?];
            while self.stream.consume(TokenKind::And) {
                lanes.push(self.parse_lane()?);
            }
            let having = self.parse_having()?;
            return Ok(SelectionStatementKind::Lanes { lanes, having });
        }

        let constraint = self.parse_structural_constraint()?;
        let having = self.parse_having()?;
        Ok(SelectionStatementKind::Structural { constraint, having })
    }

    fn parse_having(&mut self) -> ParseResult<Option<Expression>> {
        if self.stream.consume(TokenKind::Having) {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    fn parse_lane(&mut self) -> ParseResult<LaneStatement> {
        let start = self.stream.expect(TokenKind::Lane)?.span.start;
        let name = self.parse_identifier()?.node;
        let alias = if self.stream.consume(TokenKind::As) {
            Some(self.parse_member()?.node)
        } else {
            None
        };
        let constraint = self.parse_structural_constraint()?;

        Ok(LaneStatement {
            name,
            alias,
            constraint,
            span: start..self.stream.previous_end(),
        })
    }

    // ========================================================================
    // Grouping
    // ========================================================================

    pub(super) fn parse_group(&mut self) -> ParseResult<GroupStatement> {
        let start = self.stream.expect(TokenKind::Group)?.span.start;

        let mut expressions = vec![self.parse_group_expression()?];
        while self.stream.consume(TokenKind::Comma) {
            expressions.push(self.parse_group_expression()?);
        }

        Ok(GroupStatement {
            expressions,
            span: start..self.stream.previous_end(),
        })
    }

    fn parse_group_expression(&mut self) -> ParseResult<GroupExpression> {
        let start = self.stream.expect(TokenKind::By)?.span.start;
        let selector = self.parse_expression()?;

        let filter = if self.stream.consume(TokenKind::Filter) {
            self.stream.expect(TokenKind::On)?;
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.stream.expect(TokenKind::Label)?;
        let label = self.stream.expect(TokenKind::StringLiteral)?.text;

        let default = if self.stream.consume(TokenKind::Default) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(GroupExpression {
            selector,
            filter,
            label,
            default,
            span: start..self.stream.previous_end(),
        })
    }

    // ========================================================================
    // Result
    // ========================================================================

    pub(super) fn parse_result(&mut self) -> ParseResult<ResultStatement> {
        let start = self.stream.current().span.start;

        let limit = if self.stream.check(TokenKind::Limit) {
            let limit_start = self.stream.advance().span.start;
            let first = self.stream.consume(TokenKind::First);
            let value = self.parse_unsigned_integer()?.node;
            Some(ResultLimit {
                first,
                value,
                span: limit_start..self.stream.previous_end(),
            })
        } else {
            None
        };

        let mut order = Vec::new();
        if self.stream.consume(TokenKind::Order) {
            self.stream.expect(TokenKind::By)?;
            order.push(self.parse_order_expression()?);
            while self.stream.consume(TokenKind::Comma) {
                order.push(self.parse_order_expression()?);
            }
        }

        Ok(ResultStatement {
            limit,
            order,
            span: start..self.stream.previous_end().max(start),
        })
    }

    fn parse_order_expression(&mut self) -> ParseResult<OrderExpression> {
        let start = self.stream.current().span.start;
        let expression = self.parse_expression()?;

        let direction = match self.stream.consume_any(SORT_DIRECTIONS) {
            Some(token) if token.kind == TokenKind::Asc => SortDirection::Asc,
            Some(_) => SortDirection::Desc,
            None => {
                return Err(self
                    .stream
                    .expected_error("a sort direction", SORT_DIRECTIONS));
            }
        };

        Ok(OrderExpression {
            expression,
            direction,
            span: start..self.stream.previous_end(),
        })
    }
}
