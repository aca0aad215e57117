//! Shared parser infrastructure for token stream navigation and error handling.
//!
//! Every grammar module navigates tokens through [`TokenStream`]. Besides
//! plain lookahead the stream tracks:
//! - the kind of the previously consumed token, for postfix predicates,
//! - the set of kinds tested at the current position, for error messages,
//! - marks for speculative parsing.

use crate::lexer::token::{Token, TokenKind, TokenSet};
use crate::parser::error::{ParseError, found_text};
use std::borrow::Cow;
use std::cell::Cell;

/// Common result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A saved cursor position.
///
/// Obtained from [`TokenStream::mark`] and consumed by
/// [`TokenStream::rewind`]. A mark that is simply dropped commits whatever
/// was parsed since it was taken.
#[derive(Debug)]
#[must_use = "a mark does nothing unless it is rewound to"]
pub struct Mark {
    pos: usize,
    previous: Option<TokenKind>,
}

/// Token stream navigator used by every grammar rule.
///
/// The underlying slice always ends in an `Eof` token; navigation never moves
/// past it.
pub struct TokenStream<'a> {
    tokens: Cow<'a, [Token]>,
    pos: usize,
    previous: Option<TokenKind>,
    expected: Cell<TokenSet>,
}

impl<'a> TokenStream<'a> {
    /// Creates a new token stream from a token slice, appending an `Eof`
    /// token when the slice does not already end with one.
    pub fn new(tokens: &'a [Token]) -> Self {
        let tokens = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => Cow::Borrowed(tokens),
            last => {
                let eof_pos = last.map_or(0, |token| token.span.end);
                let mut owned = tokens.to_vec();
                owned.push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));
                Cow::Owned(owned)
            }
        };

        Self {
            tokens,
            pos: 0,
            previous: None,
            expected: Cell::new(TokenSet::EMPTY),
        }
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Returns the current token.
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the token `k` positions ahead of the cursor. Lookahead past
    /// the end yields the `Eof` token.
    pub fn peek(&self, k: usize) -> &Token {
        let index = self.pos.saturating_add(k).min(self.last_index());
        &self.tokens[index]
    }

    pub fn peek_kind(&self, k: usize) -> TokenKind {
        self.peek(k).kind
    }

    /// Kind of the most recently consumed token, if any.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.previous
    }

    /// End offset of the most recently consumed token, or the start of the
    /// current token when nothing has been consumed yet.
    pub fn previous_end(&self) -> usize {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.end
        } else {
            self.current().span.start
        }
    }

    /// Returns true if the token at `k` starts exactly where the token at
    /// `k - 1` ends.
    pub fn adjacent(&self, k: usize) -> bool {
        if k == 0 {
            return self.pos > 0 && self.previous_end() == self.current().span.start;
        }
        self.peek(k - 1).span.end == self.peek(k).span.start
    }

    /// Consumes the current token and returns it.
    ///
    /// Does not move past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.last_index() {
            self.pos += 1;
            self.previous = Some(token.kind);
            self.expected.set(TokenSet::EMPTY);
        }
        token
    }

    /// Checks if the current token matches the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.expect_at_current(TokenSet::single(kind));
        self.peek_kind(0) == kind
    }

    /// Checks if the current token is a member of `set`.
    pub fn check_any(&self, set: TokenSet) -> bool {
        self.expect_at_current(set);
        set.contains(self.peek_kind(0))
    }

    /// Consumes the current token if it matches the given kind.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is a member of `set`.
    pub fn consume_any(&mut self, set: TokenSet) -> Option<Token> {
        if self.check_any(set) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expects a specific token kind and returns the consumed token.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    /// Records `set` as acceptable at the cursor without testing anything.
    pub fn expect_at_current(&self, set: TokenSet) {
        self.expected.set(self.expected.get().union(set));
    }

    /// Kinds tested at the current position since the cursor last moved.
    pub fn expected(&self) -> TokenSet {
        self.expected.get()
    }

    /// Creates a syntax error for the current token listing every kind
    /// tested at this position.
    pub fn unexpected(&self) -> ParseError {
        ParseError::unexpected(self.current(), self.expected())
    }

    /// Creates a syntax error for the current token with a custom message.
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::unexpected(self.current(), self.expected()).with_message(message)
    }

    /// Records `set` as acceptable and creates an error reading
    /// "expected {what}, found ...".
    pub fn expected_error(&self, what: &str, set: TokenSet) -> ParseError {
        self.expect_at_current(set);
        let current = self.current();
        self.unexpected().with_message(format!(
            "expected {what}, found {}",
            found_text(current.kind, &current.text)
        ))
    }

    /// Saves the cursor.
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            previous: self.previous,
        }
    }

    /// Restores the cursor saved in `mark`.
    pub fn rewind(&mut self, mark: Mark) {
        if mark.pos != self.pos {
            self.expected.set(TokenSet::EMPTY);
        }
        self.pos = mark.pos;
        self.previous = mark.previous;
    }

    /// Returns the current index in the token stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true once the cursor reached the `Eof` token.
    pub fn at_eof(&self) -> bool {
        self.peek_kind(0) == TokenKind::Eof
    }

    /// Returns the underlying tokens, including the trailing `Eof`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
