//! Loop expressions.
//!
//! ```text
//! loop     := FOREACH expr AS variable control (COUNT counter (',' counter)*)?
//! control  := (EVEN | ODD)? (OMIT expr)? (RANGE range)? (STEP range)? (DO expr)? END
//! range    := '(' expr ',' expr ')'
//! counter  := expr AS variable
//! ```
//!
//! The loop source and counter constraints are parsed above the assignment
//! level so that `AS` is left for the loop itself.

use crate::ast::{BoundedRange, Counter, LoopControl, LoopExpression, Parity};
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::expression::precedence;

impl<'a> Parser<'a> {
    pub(super) fn parse_loop_expression(&mut self) -> ParseResult<LoopExpression> {
        self.nested("loop", |p| {
            let start = p.stream.expect(TokenKind::Foreach)?.span.start;
            let source = p.parse_expression_bp(precedence::DISJUNCTION)?;
            p.stream.expect(TokenKind::As)?;
            let variable = p.parse_variable()?.node;
            let control = p.parse_loop_control()?;

            let mut counters = Vec::new();
            if p.stream.consume(TokenKind::Count) {
                counters.push(p.parse_counter()?);
                while p.stream.consume(TokenKind::Comma) {
                    counters.push(p.parse_counter()?);
                }
            }

            Ok(LoopExpression {
                source,
                variable,
                control,
                counters,
                span: start..p.stream.previous_end(),
            })
        })
    }

    fn parse_loop_control(&mut self) -> ParseResult<LoopControl> {
        let start = self.stream.current().span.start;

        let parity = if self.stream.consume(TokenKind::Even) {
            Some(Parity::Even)
        } else if self.stream.consume(TokenKind::Odd) {
            Some(Parity::Odd)
        } else {
            None
        };

        let omit = if self.stream.consume(TokenKind::Omit) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let range = if self.stream.consume(TokenKind::Range) {
            Some(self.parse_bounded_range()?)
        } else {
            None
        };
        let step = if self.stream.consume(TokenKind::Step) {
            Some(self.parse_bounded_range()?)
        } else {
            None
        };
        let action = if self.stream.consume(TokenKind::Do) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.stream.expect(TokenKind::End)?;

        Ok(LoopControl {
            parity,
            omit,
            range,
            step,
            action,
            span: start..self.stream.previous_end(),
        })
    }

    fn parse_bounded_range(&mut self) -> ParseResult<BoundedRange> {
        let start = self.stream.expect(TokenKind::LParen)?.span.start;
        let lower = self.parse_expression()?;
        self.stream.expect(TokenKind::Comma)?;
        let upper = self.parse_expression()?;
        self.stream.expect(TokenKind::RParen)?;
        Ok(BoundedRange {
            lower,
            upper,
            span: start..self.stream.previous_end(),
        })
    }

    fn parse_counter(&mut self) -> ParseResult<Counter> {
        let start = self.stream.current().span.start;
        let constraint = self.parse_expression_bp(precedence::DISJUNCTION)?;
        self.stream.expect(TokenKind::As)?;
        let variable = self.parse_variable()?.node;
        Ok(Counter {
            constraint,
            variable,
            span: start..self.stream.previous_end(),
        })
    }
}
