//! Expression parsing for IQL.
//!
//! A single precedence-climbing loop handles every binary and postfix form.
//! Levels, higher binds tighter:
//!
//! | Level | Form                                   |
//! |-------|----------------------------------------|
//! | 19    | `.name`                                |
//! | 18    | `(args)` after a name                  |
//! | 17    | `[args]` after a name or `) } ]`       |
//! | 16    | `{args}` after a name or `) ]`         |
//! | 12    | `* / %`                                |
//! | 11    | `+ -`                                  |
//! | 10    | `& && ^ \| << >>`                      |
//! | 9     | `< <= > >=`                            |
//! | 8     | `=~ !~ =# !#`                          |
//! | 7     | `== !=`                                |
//! | 6     | `AND`                                  |
//! | 5     | `OR \|\|`                              |
//! | 4     | `AS [OPTIONAL] target`                 |
//! | 3     | `[ALL\|*] [NOT\|!] IN set`             |
//! | 2     | `? then : else` (right-associative)    |
//!
//! The call, list access and annotation access predicates look at the
//! previously consumed token, so `(a)(b)` is not a call while `(a)[b]` is a
//! list access. A name is an identifier, `@variable` or `$member`.

use crate::ast::{
    AdditiveOperator, AssignmentTarget, BitwiseOperator, ComparisonOperator, EqualityOperator,
    Expression, ExpressionKind, ListLiteral, MultiplicativeOperator, Primary, PrimitiveType,
    StringOperator, UnaryOperator,
};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use crate::parser::literal::Number;

/// Binding strengths of the expression grammar.
pub(super) mod precedence {
    pub const TERNARY: u8 = 2;
    pub const SET_PREDICATE: u8 = 3;
    pub const ASSIGNMENT: u8 = 4;
    pub const DISJUNCTION: u8 = 5;
    pub const CONJUNCTION: u8 = 6;
    pub const EQUALITY: u8 = 7;
    pub const STRING: u8 = 8;
    pub const COMPARISON: u8 = 9;
    pub const BITWISE: u8 = 10;
    pub const ADDITIVE: u8 = 11;
    pub const MULTIPLICATIVE: u8 = 12;
    pub const UNARY_OPERAND: u8 = 13;
    pub const CAST_OPERAND: u8 = 15;
    pub const ANNOTATION: u8 = 16;
    pub const LIST: u8 = 17;
    pub const CALL: u8 = 18;
    pub const PATH: u8 = 19;
}

/// Type names usable in casts and typed list literals.
const TYPE_NAMES: TokenSet = TokenSet::new(&[
    TokenKind::Boolean,
    TokenKind::String,
    TokenKind::Int,
    TokenKind::Long,
    TokenKind::Float,
    TokenKind::Double,
]);

/// Tokens that can start an expression.
pub(super) const EXPRESSION_START: TokenSet = TokenSet::new(&[
    TokenKind::Null,
    TokenKind::True,
    TokenKind::False,
    TokenKind::PureDigits,
    TokenKind::Digits,
    TokenKind::StringLiteral,
    TokenKind::LBrace,
    TokenKind::Variable,
    TokenKind::Member,
    TokenKind::Identifier,
    TokenKind::LParen,
    TokenKind::Not,
    TokenKind::Bang,
    TokenKind::Minus,
    TokenKind::Tilde,
    TokenKind::Foreach,
])
.union(TYPE_NAMES);

/// `@x` and `$x` lex as one token, so they count as names here.
const CALLABLE: TokenSet = TokenSet::new(&[
    TokenKind::Identifier,
    TokenKind::Variable,
    TokenKind::Member,
]);
const LIST_ACCESSIBLE: TokenSet =
    CALLABLE.union(TokenSet::new(&[TokenKind::RParen, TokenKind::RBrace, TokenKind::RBracket]));
const ANNOTATION_ACCESSIBLE: TokenSet =
    CALLABLE.union(TokenSet::new(&[TokenKind::RParen, TokenKind::RBracket]));

/// A binary or postfix operator found after an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Infix {
    Path,
    Call,
    List,
    Annotation,
    Multiplicative(MultiplicativeOperator),
    Additive(AdditiveOperator),
    Bitwise(BitwiseOperator),
    Comparison(ComparisonOperator),
    StringOp(StringOperator),
    Equality(EqualityOperator),
    Conjunction,
    Disjunction,
    Assignment,
    SetPredicate,
    Ternary,
}

impl Infix {
    fn precedence(self) -> u8 {
        use precedence::*;
        match self {
            Infix::Path => PATH,
            Infix::Call => CALL,
            Infix::List => LIST,
            Infix::Annotation => ANNOTATION,
            Infix::Multiplicative(_) => MULTIPLICATIVE,
            Infix::Additive(_) => ADDITIVE,
            Infix::Bitwise(_) => BITWISE,
            Infix::Comparison(_) => COMPARISON,
            Infix::StringOp(_) => STRING,
            Infix::Equality(_) => EQUALITY,
            Infix::Conjunction => CONJUNCTION,
            Infix::Disjunction => DISJUNCTION,
            Infix::Assignment => ASSIGNMENT,
            Infix::SetPredicate => SET_PREDICATE,
            Infix::Ternary => TERNARY,
        }
    }
}

fn primitive_type(kind: TokenKind) -> Option<PrimitiveType> {
    match kind {
        TokenKind::Boolean => Some(PrimitiveType::Boolean),
        TokenKind::String => Some(PrimitiveType::String),
        TokenKind::Int => Some(PrimitiveType::Int),
        TokenKind::Long => Some(PrimitiveType::Long),
        TokenKind::Float => Some(PrimitiveType::Float),
        TokenKind::Double => Some(PrimitiveType::Double),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parses a full expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_bp(0)
    }

    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_precedence`.
    pub(super) fn parse_expression_bp(&mut self, min_precedence: u8) -> ParseResult<Expression> {
        self.nested("expression", |p| {
            let mut lhs = p.parse_prefix_expression()?;

            while let Some(infix) = p.infix_at() {
                if infix.precedence() < min_precedence {
                    break;
                }
                lhs = p.parse_infix_expression(lhs, infix)?;
            }

            Ok(lhs)
        })
    }

    /// Comma-separated expressions; at least one.
    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut items = vec![self.parse_expression()?];
        while self.stream.consume(TokenKind::Comma) {
            items.push(self.parse_expression()?);
        }
        Ok(items)
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_arguments(&mut self, close: TokenKind, allow_empty: bool) -> ParseResult<Vec<Expression>> {
        if allow_empty && self.stream.consume(close) {
            return Ok(Vec::new());
        }
        let items = self.parse_expression_list()?;
        self.stream.expect(close)?;
        Ok(items)
    }

    fn at_set_predicate(&self) -> bool {
        let mut k = 0;
        if matches!(self.stream.peek_kind(k), TokenKind::All | TokenKind::Star) {
            k += 1;
        }
        if matches!(self.stream.peek_kind(k), TokenKind::Not | TokenKind::Bang) {
            k += 1;
        }
        self.stream.peek_kind(k) == TokenKind::In
    }

    fn infix_at(&self) -> Option<Infix> {
        let previous = self.stream.previous_kind();
        let after = |set: TokenSet| previous.is_some_and(|kind| set.contains(kind));

        let infix = match self.stream.peek_kind(0) {
            TokenKind::Dot => Infix::Path,
            TokenKind::LParen if after(CALLABLE) => Infix::Call,
            TokenKind::LBracket if after(LIST_ACCESSIBLE) => Infix::List,
            TokenKind::LBrace if after(ANNOTATION_ACCESSIBLE) => Infix::Annotation,

            TokenKind::All | TokenKind::Star | TokenKind::Not | TokenKind::Bang | TokenKind::In
                if self.at_set_predicate() =>
            {
                Infix::SetPredicate
            }

            TokenKind::Star => Infix::Multiplicative(MultiplicativeOperator::Multiply),
            TokenKind::Slash => Infix::Multiplicative(MultiplicativeOperator::Divide),
            TokenKind::Percent => Infix::Multiplicative(MultiplicativeOperator::Modulo),

            TokenKind::Plus => Infix::Additive(AdditiveOperator::Add),
            TokenKind::Minus => Infix::Additive(AdditiveOperator::Subtract),

            TokenKind::Ampersand => Infix::Bitwise(BitwiseOperator::And),
            TokenKind::DoubleAmpersand => Infix::Bitwise(BitwiseOperator::DoubleAnd),
            TokenKind::Caret => Infix::Bitwise(BitwiseOperator::Xor),
            TokenKind::Pipe => Infix::Bitwise(BitwiseOperator::Or),
            TokenKind::ShiftLeft => Infix::Bitwise(BitwiseOperator::ShiftLeft),
            TokenKind::ShiftRight => Infix::Bitwise(BitwiseOperator::ShiftRight),

            TokenKind::Lt => Infix::Comparison(ComparisonOperator::Less),
            TokenKind::LtEq => Infix::Comparison(ComparisonOperator::LessOrEqual),
            TokenKind::Gt => Infix::Comparison(ComparisonOperator::Greater),
            TokenKind::GtEq => Infix::Comparison(ComparisonOperator::GreaterOrEqual),

            TokenKind::Matches => Infix::StringOp(StringOperator::Matches),
            TokenKind::NotMatches => Infix::StringOp(StringOperator::NotMatches),
            TokenKind::Contains => Infix::StringOp(StringOperator::Contains),
            TokenKind::NotContains => Infix::StringOp(StringOperator::NotContains),

            TokenKind::EqEq => Infix::Equality(EqualityOperator::Equal),
            TokenKind::NotEq => Infix::Equality(EqualityOperator::NotEqual),

            TokenKind::And => Infix::Conjunction,
            TokenKind::Or | TokenKind::DoublePipe => Infix::Disjunction,
            TokenKind::As => Infix::Assignment,
            TokenKind::Question => Infix::Ternary,

            _ => return None,
        };
        Some(infix)
    }

    fn parse_infix_expression(&mut self, lhs: Expression, infix: Infix) -> ParseResult<Expression> {
        let start = lhs.span.start;
        let binary_rhs = |p: &mut Self| p.parse_expression_bp(infix.precedence() + 1);

        let kind = match infix {
            Infix::Path => {
                self.stream.advance();
                let name = self.parse_identifier()?;
                ExpressionKind::PathAccess(Box::new(lhs), name.node)
            }
            Infix::Call => {
                self.stream.advance();
                let arguments = self.parse_arguments(TokenKind::RParen, true)?;
                ExpressionKind::MethodInvocation(Box::new(lhs), arguments)
            }
            Infix::List => {
                self.stream.advance();
                let indices = self.parse_arguments(TokenKind::RBracket, false)?;
                ExpressionKind::ListAccess(Box::new(lhs), indices)
            }
            Infix::Annotation => {
                self.stream.advance();
                let keys = self.parse_arguments(TokenKind::RBrace, false)?;
                ExpressionKind::AnnotationAccess(Box::new(lhs), keys)
            }
            Infix::Multiplicative(op) => {
                self.stream.advance();
                ExpressionKind::Multiplicative(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Additive(op) => {
                self.stream.advance();
                ExpressionKind::Additive(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Bitwise(op) => {
                self.stream.advance();
                ExpressionKind::Bitwise(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Comparison(op) => {
                self.stream.advance();
                ExpressionKind::Comparison(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::StringOp(op) => {
                self.stream.advance();
                ExpressionKind::StringOp(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Equality(op) => {
                self.stream.advance();
                ExpressionKind::Equality(op, Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Conjunction => {
                self.stream.advance();
                ExpressionKind::Conjunction(Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Disjunction => {
                self.stream.advance();
                ExpressionKind::Disjunction(Box::new(lhs), Box::new(binary_rhs(self)?))
            }
            Infix::Assignment => {
                self.stream.advance();
                let optional = self.stream.consume(TokenKind::Optional);
                let target = self.parse_assignment_target()?;
                ExpressionKind::Assignment {
                    source: Box::new(lhs),
                    optional,
                    target,
                }
            }
            Infix::SetPredicate => {
                let all = self.stream.consume(TokenKind::All) || self.stream.consume(TokenKind::Star);
                let negated =
                    self.stream.consume(TokenKind::Not) || self.stream.consume(TokenKind::Bang);
                self.stream.expect(TokenKind::In)?;
                let set = binary_rhs(self)?;
                ExpressionKind::SetPredicate {
                    element: Box::new(lhs),
                    set: Box::new(set),
                    all,
                    negated,
                }
            }
            Infix::Ternary => {
                self.stream.advance();
                let then_branch = self.parse_expression()?;
                self.stream.expect(TokenKind::Colon)?;
                let else_branch = self.parse_expression_bp(precedence::TERNARY)?;
                ExpressionKind::Ternary {
                    condition: Box::new(lhs),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                }
            }
        };

        Ok(kind.at(start..self.stream.previous_end()))
    }

    fn parse_assignment_target(&mut self) -> ParseResult<AssignmentTarget> {
        match self.stream.peek_kind(0) {
            TokenKind::Variable => Ok(AssignmentTarget::Variable(self.parse_variable()?.node)),
            TokenKind::Member => Ok(AssignmentTarget::Member(self.parse_member()?.node)),
            _ => Err(self.stream.expected_error(
                "a variable or member",
                TokenSet::new(&[TokenKind::Variable, TokenKind::Member, TokenKind::Optional]),
            )),
        }
    }

    /// The type of a `(type)` cast prefix at the current position.
    fn cast_at(&self) -> Option<PrimitiveType> {
        if self.stream.peek_kind(0) != TokenKind::LParen
            || self.stream.peek_kind(2) != TokenKind::RParen
        {
            return None;
        }
        primitive_type(self.stream.peek_kind(1))
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let start = self.stream.current().span.start;

        if let Some(ty) = self.cast_at() {
            self.stream.advance();
            self.stream.advance();
            self.stream.advance();
            let operand = self.parse_expression_bp(precedence::CAST_OPERAND)?;
            let kind = ExpressionKind::Cast(ty, Box::new(operand));
            return Ok(kind.at(start..self.stream.previous_end()));
        }

        let kind = match self.stream.peek_kind(0) {
            TokenKind::LParen => {
                self.stream.advance();
                let inner = self.parse_expression()?;
                self.stream.expect(TokenKind::RParen)?;
                ExpressionKind::Wrapping(Box::new(inner))
            }
            TokenKind::Not | TokenKind::Bang | TokenKind::Minus | TokenKind::Tilde => {
                let op = match self.stream.advance().kind {
                    TokenKind::Minus => UnaryOperator::Minus,
                    TokenKind::Tilde => UnaryOperator::BitwiseNot,
                    _ => UnaryOperator::Not,
                };
                let operand = self.parse_expression_bp(precedence::UNARY_OPERAND)?;
                ExpressionKind::Unary(op, Box::new(operand))
            }
            TokenKind::Foreach => ExpressionKind::ForEach(Box::new(self.parse_loop_expression()?)),
            _ => ExpressionKind::Primary(self.parse_primary()?),
        };

        Ok(kind.at(start..self.stream.previous_end()))
    }

    fn parse_primary(&mut self) -> ParseResult<Primary> {
        let kind = self.stream.peek_kind(0);
        let primary = match kind {
            TokenKind::Null => {
                self.stream.advance();
                Primary::Null
            }
            TokenKind::True | TokenKind::False => {
                self.stream.advance();
                Primary::Boolean(kind == TokenKind::True)
            }
            TokenKind::PureDigits | TokenKind::Digits => match self.parse_unsigned_number()?.node {
                Number::Integer(text) => Primary::Integer(text),
                Number::Float(text) => Primary::Float(text),
            },
            TokenKind::StringLiteral => Primary::String(self.stream.advance().text),
            TokenKind::LBrace => Primary::List(self.parse_list_literal(None)?),
            _ if TYPE_NAMES.contains(kind) && self.stream.peek_kind(1) == TokenKind::LBracket => {
                let element_type = primitive_type(self.stream.advance().kind);
                self.stream.expect(TokenKind::LBracket)?;
                self.stream.expect(TokenKind::RBracket)?;
                Primary::List(self.parse_list_literal(element_type)?)
            }
            TokenKind::Variable => Primary::Variable(self.parse_variable()?.node),
            TokenKind::Member => Primary::Member(self.parse_member()?.node),
            TokenKind::Identifier if self.stream.peek_kind(1) == TokenKind::DoubleColon => {
                let namespace = self.stream.advance().text;
                self.stream.advance();
                let name = self.parse_identifier()?;
                Primary::QualifiedIdentifier(namespace, name.node)
            }
            TokenKind::Identifier => Primary::Identifier(self.stream.advance().text),
            _ => return Err(self.stream.expected_error("an expression", EXPRESSION_START)),
        };
        Ok(primary)
    }

    /// `{ exprList? }`
    fn parse_list_literal(&mut self, element_type: Option<PrimitiveType>) -> ParseResult<ListLiteral> {
        self.stream.expect(TokenKind::LBrace)?;
        let items = self.parse_arguments(TokenKind::RBrace, true)?;
        Ok(ListLiteral {
            element_type,
            items,
        })
    }
}
