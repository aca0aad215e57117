//! Position markers.
//!
//! ```text
//! marker   := marker (AND | '&&') marker
//!           | marker (OR | '||') marker
//!           | '(' marker ')'
//!           | Identifier ('(' argument (',' argument)* ')')?
//! argument := sign? digits ('.' digits)?
//! ```

use crate::ast::{PositionArgument, PositionMarker, PositionMarkerKind, Spanned};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::literal::Number;

const MARKER_START: TokenSet = TokenSet::new(&[TokenKind::Identifier, TokenKind::LParen]);

const CONJUNCTION: u8 = 2;
const DISJUNCTION: u8 = 1;

impl<'a> Parser<'a> {
    pub(super) fn parse_position_marker(&mut self) -> ParseResult<PositionMarker> {
        self.parse_position_marker_bp(0)
    }

    fn parse_position_marker_bp(&mut self, min_precedence: u8) -> ParseResult<PositionMarker> {
        self.nested("marker", |p| {
            let mut lhs = p.parse_position_marker_prefix()?;

            loop {
                let precedence = match p.stream.peek_kind(0) {
                    TokenKind::And | TokenKind::DoubleAmpersand => CONJUNCTION,
                    TokenKind::Or | TokenKind::DoublePipe => DISJUNCTION,
                    _ => break,
                };
                if precedence < min_precedence {
                    break;
                }

                p.stream.advance();
                let rhs = p.parse_position_marker_bp(precedence + 1)?;
                let span = lhs.span.start..rhs.span.end;
                let kind = if precedence == CONJUNCTION {
                    PositionMarkerKind::Conjunction(Box::new(lhs), Box::new(rhs))
                } else {
                    PositionMarkerKind::Disjunction(Box::new(lhs), Box::new(rhs))
                };
                lhs = Spanned::new(kind, span);
            }

            Ok(lhs)
        })
    }

    fn parse_position_marker_prefix(&mut self) -> ParseResult<PositionMarker> {
        let start = self.stream.current().span.start;

        let kind = if self.stream.consume(TokenKind::LParen) {
            let inner = self.parse_position_marker()?;
            self.stream.expect(TokenKind::RParen)?;
            PositionMarkerKind::Wrapping(Box::new(inner))
        } else if self.stream.check(TokenKind::Identifier) {
            let name = self.stream.advance().text;
            let mut arguments = Vec::new();
            if self.stream.consume(TokenKind::LParen) {
                arguments.push(self.parse_position_argument()?);
                while self.stream.consume(TokenKind::Comma) {
                    arguments.push(self.parse_position_argument()?);
                }
                self.stream.expect(TokenKind::RParen)?;
            }
            PositionMarkerKind::Call { name, arguments }
        } else {
            return Err(self.stream.expected_error("a position marker", MARKER_START));
        };

        Ok(Spanned::new(kind, start..self.stream.previous_end()))
    }

    fn parse_position_argument(&mut self) -> ParseResult<PositionArgument> {
        Ok(match self.parse_signed_number()?.node {
            Number::Integer(text) => PositionArgument::Integer(text),
            Number::Float(text) => PositionArgument::Float(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn marker(source: &str) -> PositionMarker {
        let tokens = tokenize(source).tokens;
        let mut parser = Parser::new(&tokens);
        let marker = parser
            .parse_position_marker()
            .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
        assert!(parser.stream.at_eof(), "trailing input in {source:?}");
        marker
    }

    fn call(name: &str, arguments: Vec<PositionArgument>) -> PositionMarker {
        Spanned::new(
            PositionMarkerKind::Call {
                name: name.into(),
                arguments,
            },
            0..0,
        )
    }

    #[test]
    fn bare_and_argument_calls() {
        assert_eq!(marker("isFirst"), call("isFirst", Vec::new()));
        assert_eq!(
            marker("isAt(-3, +0.5)"),
            call(
                "isAt",
                vec![
                    PositionArgument::Integer("-3".into()),
                    PositionArgument::Float("0.5".into()),
                ]
            )
        );
    }

    #[test]
    fn conjunction_binds_tighter() {
        let parsed = marker("a or b && c");
        let PositionMarkerKind::Disjunction(lhs, rhs) = parsed.node else {
            panic!("expected disjunction");
        };
        assert_eq!(*lhs, call("a", Vec::new()));
        assert!(matches!(rhs.node, PositionMarkerKind::Conjunction(..)));
    }

    #[test]
    fn left_associative() {
        let parsed = marker("a and b and c");
        let PositionMarkerKind::Conjunction(lhs, _) = parsed.node else {
            panic!("expected conjunction");
        };
        assert!(matches!(lhs.node, PositionMarkerKind::Conjunction(..)));
        assert_eq!(parsed.span, 0..13);
    }

    #[test]
    fn wrapping() {
        let parsed = marker("(a || b) and c");
        let PositionMarkerKind::Conjunction(lhs, _) = parsed.node else {
            panic!("expected conjunction");
        };
        assert!(matches!(lhs.node, PositionMarkerKind::Wrapping(_)));
    }

    #[test]
    fn empty_argument_list_fails() {
        let tokens = tokenize("isAt()").tokens;
        let err = Parser::new(&tokens).parse_position_marker().unwrap_err();
        assert_eq!(err.found, TokenKind::RParen);
        assert!(err.expected.contains(TokenKind::PureDigits));
    }
}
