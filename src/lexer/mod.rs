//! Lexical analysis for IQL.
//!
//! The scanner itself is derived with logos on [`TokenKind`]; this module
//! post-processes its output:
//! - identifiers are reclassified as keywords through [`keywords::lookup_keyword`],
//! - sigils (`@`, `$`) and string quotes are stripped from token text,
//! - string escapes are decoded,
//! - runs of unrecognised characters are coalesced into a single diagnostic.
//!
//! Lexing never stops early; every problem is reported in
//! [`LexerResult::diagnostics`] and the token stream always ends in `Eof`.

pub mod keywords;
pub mod token;

use crate::ast::Span;
use crate::diag::Diag;
use logos::Logos;
use smol_str::SmolStr;
use token::{Token, TokenKind};

/// Result of lexical analysis.
///
/// Contains both the tokens produced and any diagnostics encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// Diagnostics encountered during lexing.
    pub diagnostics: Vec<Diag>,
}

impl LexerResult {
    /// Returns true if lexing produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A lexical analyzer for IQL source text.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns the result.
    pub fn tokenize(mut self) -> LexerResult {
        let mut scanner = TokenKind::lexer(self.source);
        // Invalid bytes seen since the last token, without trailing skipped input.
        let mut invalid: Option<Span> = None;

        while let Some(result) = scanner.next() {
            let span = scanner.span();
            match result {
                Ok(kind) => {
                    if let Some(fragment) = invalid.take() {
                        self.invalid_fragment(fragment);
                    }
                    self.add_token(kind, span);
                }
                Err(()) => {
                    let start = invalid.map_or(span.start, |fragment| fragment.start);
                    invalid = Some(start..span.end);
                }
            }
        }

        if let Some(fragment) = invalid.take() {
            self.invalid_fragment(fragment);
        }

        let eof_pos = self.source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));

        LexerResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn add_token(&mut self, kind: TokenKind, span: Span) {
        let raw = &self.source[span.clone()];
        let token = match kind {
            TokenKind::Identifier => match keywords::lookup_keyword(raw) {
                Some(keyword) => Token::new(keyword, span, raw),
                None => Token::new(TokenKind::Identifier, span, raw),
            },
            TokenKind::Variable | TokenKind::Member => Token::new(kind, span, &raw[1..]),
            TokenKind::StringLiteral => {
                let value = self.unescape(&raw[1..raw.len() - 1], span.start + 1);
                Token::new(kind, span, value)
            }
            _ => Token::new(kind, span, raw),
        };
        self.tokens.push(token);
    }

    /// Decodes the escape sequences of a string literal body starting at
    /// byte offset `offset`.
    fn unescape(&mut self, body: &str, offset: usize) -> SmolStr {
        if !body.contains('\\') {
            return SmolStr::new(body);
        }

        let mut value = String::with_capacity(body.len());
        let mut chars = body.char_indices();

        while let Some((index, ch)) = chars.next() {
            if ch != '\\' {
                value.push(ch);
                continue;
            }

            let Some((_, escaped)) = chars.next() else {
                break;
            };
            match escaped {
                'b' => value.push('\u{8}'),
                't' => value.push('\t'),
                'n' => value.push('\n'),
                'f' => value.push('\u{c}'),
                'r' => value.push('\r'),
                '"' => value.push('"'),
                '\'' => value.push('\''),
                '\\' => value.push('\\'),
                'u' => {
                    let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                    let decoded = (hex.len() == 4)
                        .then(|| u32::from_str_radix(&hex, 16).ok())
                        .flatten()
                        .and_then(char::from_u32);
                    match decoded {
                        Some(c) => value.push(c),
                        None => self.error(
                            offset + index..offset + index + 2 + hex.len(),
                            "invalid unicode escape sequence",
                        ),
                    }
                }
                other => {
                    self.error(
                        offset + index..offset + index + 1 + other.len_utf8(),
                        format!("invalid escape sequence '\\{other}'"),
                    );
                    value.push(other);
                }
            }
        }

        SmolStr::new(value)
    }

    fn invalid_fragment(&mut self, span: Span) {
        let fragment = &self.source[span.clone()];
        if fragment.starts_with('"') {
            self.diagnostics.push(
                Diag::error("unclosed string literal")
                    .with_label(span, "string starts here")
                    .with_help("string literals end with `\"` on the same line")
                    .with_code("iql::lexer"),
            );
        } else if fragment.chars().count() == 1 {
            self.error(span, format!("invalid character '{fragment}'"));
        } else {
            self.error(span, format!("invalid characters '{fragment}'"));
        }
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(
            Diag::error(message)
                .with_label(span, "not a valid token")
                .with_code("iql::lexer"),
        );
    }
}

/// Convenience function to tokenize a source string.
///
/// This is the main entry point for lexical analysis.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}
