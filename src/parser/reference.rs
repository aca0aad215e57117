//! Reference parsing: variables, members, identifiers and member labels.

use crate::ast::Spanned;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use smol_str::SmolStr;

impl<'a> Parser<'a> {
    fn parse_name(&mut self, kind: TokenKind) -> ParseResult<Spanned<SmolStr>> {
        let token = self.stream.expect(kind)?;
        Ok(Spanned::new(token.text, token.span))
    }

    /// `@name`, returning the name without its sigil.
    pub(super) fn parse_variable(&mut self) -> ParseResult<Spanned<SmolStr>> {
        self.parse_name(TokenKind::Variable)
    }

    /// `$name`, returning the name without its sigil.
    pub(super) fn parse_member(&mut self) -> ParseResult<Spanned<SmolStr>> {
        self.parse_name(TokenKind::Member)
    }

    pub(super) fn parse_identifier(&mut self) -> ParseResult<Spanned<SmolStr>> {
        self.parse_name(TokenKind::Identifier)
    }

    /// Optional `$name ':'` prefix of node and edge content.
    pub(super) fn parse_member_label(&mut self) -> ParseResult<Option<SmolStr>> {
        let at_label = self.stream.check(TokenKind::Member)
            && self.stream.peek_kind(1) == TokenKind::Colon;
        if !at_label {
            return Ok(None);
        }

        let member = self.parse_member()?;
        self.stream.expect(TokenKind::Colon)?;
        Ok(Some(member.node))
    }
}
