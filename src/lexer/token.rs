//! Token types and representations for IQL lexical analysis.
//!
//! Token kinds form a closed, field-less enumeration. Literal and identifier
//! text travels alongside the kind in [`Token::text`], which keeps kinds
//! `Copy` and lets the parser describe acceptable input as a [`TokenSet`].

use crate::ast::Span;
use logos::Logos;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token in IQL.
///
/// Keyword variants carry no lexer attribute: the scanner produces an
/// [`TokenKind::Identifier`] and the keyword table reclassifies it, which
/// keeps keywords case-insensitive.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
#[repr(u8)]
pub enum TokenKind {
    // Keywords
    Adjacent,
    All,
    And,
    As,
    Asc,
    Boolean,
    By,
    Consecutive,
    Count,
    Default,
    Desc,
    Disjoint,
    Distinct,
    Do,
    Double,
    Edges,
    End,
    Even,
    False,
    Filter,
    Find,
    First,
    Float,
    Foreach,
    From,
    Group,
    Having,
    Hits,
    In,
    Int,
    Label,
    Lane,
    Limit,
    Long,
    Not,
    Null,
    Odd,
    Omit,
    On,
    Optional,
    Or,
    Order,
    Ordered,
    Range,
    Reverse,
    Rooted,
    Step,
    String,
    True,
    Unordered,
    With,

    // Literal and reference forms
    #[regex("[0-9]+")]
    PureDigits,
    #[regex("[0-9]+(_+[0-9]+)+")]
    Digits,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,
    #[regex("[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,
    #[regex("@[a-zA-Z][a-zA-Z0-9_]*")]
    Variable,
    #[regex(r"\$[a-zA-Z][a-zA-Z0-9_]*")]
    Member,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("_")]
    Underscore,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("::")]
    DoubleColon,
    #[token("..")]
    DoubleDot,

    // Edge glyphs
    #[token("<--")]
    EdgeLeft,
    #[token("-->")]
    EdgeRight,
    #[token("<->")]
    EdgeBidirectional,
    #[token("---")]
    EdgeUndirected,

    // Operators
    #[token("=")]
    Assign,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("~")]
    Tilde,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Ampersand,
    #[token("&&")]
    DoubleAmpersand,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
    #[token("||")]
    DoublePipe,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("=~")]
    Matches,
    #[token("!~")]
    NotMatches,
    #[token("=#")]
    Contains,
    #[token("!#")]
    NotContains,

    // Special
    Eof,
}

impl TokenKind {
    /// Every token kind, in discriminant order.
    pub const ALL: [TokenKind; 101] = [
        TokenKind::Adjacent,
        TokenKind::All,
        TokenKind::And,
        TokenKind::As,
        TokenKind::Asc,
        TokenKind::Boolean,
        TokenKind::By,
        TokenKind::Consecutive,
        TokenKind::Count,
        TokenKind::Default,
        TokenKind::Desc,
        TokenKind::Disjoint,
        TokenKind::Distinct,
        TokenKind::Do,
        TokenKind::Double,
        TokenKind::Edges,
        TokenKind::End,
        TokenKind::Even,
        TokenKind::False,
        TokenKind::Filter,
        TokenKind::Find,
        TokenKind::First,
        TokenKind::Float,
        TokenKind::Foreach,
        TokenKind::From,
        TokenKind::Group,
        TokenKind::Having,
        TokenKind::Hits,
        TokenKind::In,
        TokenKind::Int,
        TokenKind::Label,
        TokenKind::Lane,
        TokenKind::Limit,
        TokenKind::Long,
        TokenKind::Not,
        TokenKind::Null,
        TokenKind::Odd,
        TokenKind::Omit,
        TokenKind::On,
        TokenKind::Optional,
        TokenKind::Or,
        TokenKind::Order,
        TokenKind::Ordered,
        TokenKind::Range,
        TokenKind::Reverse,
        TokenKind::Rooted,
        TokenKind::Step,
        TokenKind::String,
        TokenKind::True,
        TokenKind::Unordered,
        TokenKind::With,
        TokenKind::PureDigits,
        TokenKind::Digits,
        TokenKind::StringLiteral,
        TokenKind::Identifier,
        TokenKind::Variable,
        TokenKind::Member,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::Semicolon,
        TokenKind::Dot,
        TokenKind::Underscore,
        TokenKind::Question,
        TokenKind::Bang,
        TokenKind::DoubleColon,
        TokenKind::DoubleDot,
        TokenKind::EdgeLeft,
        TokenKind::EdgeRight,
        TokenKind::EdgeBidirectional,
        TokenKind::EdgeUndirected,
        TokenKind::Assign,
        TokenKind::Star,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Tilde,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Ampersand,
        TokenKind::DoubleAmpersand,
        TokenKind::Caret,
        TokenKind::Pipe,
        TokenKind::DoublePipe,
        TokenKind::ShiftLeft,
        TokenKind::ShiftRight,
        TokenKind::Lt,
        TokenKind::LtEq,
        TokenKind::Gt,
        TokenKind::GtEq,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::Matches,
        TokenKind::NotMatches,
        TokenKind::Contains,
        TokenKind::NotContains,
        TokenKind::Eof,
    ];

    /// Returns true if this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        self <= TokenKind::With
    }

    /// Returns true if this token kind is a literal form.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::PureDigits
                | TokenKind::Digits
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Returns true if this token kind is an operator.
    pub fn is_operator(self) -> bool {
        (TokenKind::Assign..=TokenKind::NotContains).contains(&self)
    }

    /// Returns true if this token kind is one of the four empty-edge glyphs.
    pub fn is_edge_glyph(self) -> bool {
        matches!(
            self,
            TokenKind::EdgeLeft
                | TokenKind::EdgeRight
                | TokenKind::EdgeBidirectional
                | TokenKind::EdgeUndirected
        )
    }
}

const _: () = assert!(TokenKind::ALL.len() == TokenKind::Eof as usize + 1);
const _: () = assert!(TokenKind::ALL.len() <= 128, "TokenSet is a u128 bitset");

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Adjacent => "ADJACENT",
            TokenKind::All => "ALL",
            TokenKind::And => "AND",
            TokenKind::As => "AS",
            TokenKind::Asc => "ASC",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::By => "BY",
            TokenKind::Consecutive => "CONSECUTIVE",
            TokenKind::Count => "COUNT",
            TokenKind::Default => "DEFAULT",
            TokenKind::Desc => "DESC",
            TokenKind::Disjoint => "DISJOINT",
            TokenKind::Distinct => "DISTINCT",
            TokenKind::Do => "DO",
            TokenKind::Double => "DOUBLE",
            TokenKind::Edges => "EDGES",
            TokenKind::End => "END",
            TokenKind::Even => "EVEN",
            TokenKind::False => "FALSE",
            TokenKind::Filter => "FILTER",
            TokenKind::Find => "FIND",
            TokenKind::First => "FIRST",
            TokenKind::Float => "FLOAT",
            TokenKind::Foreach => "FOREACH",
            TokenKind::From => "FROM",
            TokenKind::Group => "GROUP",
            TokenKind::Having => "HAVING",
            TokenKind::Hits => "HITS",
            TokenKind::In => "IN",
            TokenKind::Int => "INT",
            TokenKind::Label => "LABEL",
            TokenKind::Lane => "LANE",
            TokenKind::Limit => "LIMIT",
            TokenKind::Long => "LONG",
            TokenKind::Not => "NOT",
            TokenKind::Null => "NULL",
            TokenKind::Odd => "ODD",
            TokenKind::Omit => "OMIT",
            TokenKind::On => "ON",
            TokenKind::Optional => "OPTIONAL",
            TokenKind::Or => "OR",
            TokenKind::Order => "ORDER",
            TokenKind::Ordered => "ORDERED",
            TokenKind::Range => "RANGE",
            TokenKind::Reverse => "REVERSE",
            TokenKind::Rooted => "ROOTED",
            TokenKind::Step => "STEP",
            TokenKind::String => "STRING",
            TokenKind::True => "TRUE",
            TokenKind::Unordered => "UNORDERED",
            TokenKind::With => "WITH",
            TokenKind::PureDigits => "digits",
            TokenKind::Digits => "separated digits",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Variable => "variable",
            TokenKind::Member => "member",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Underscore => "_",
            TokenKind::Question => "?",
            TokenKind::Bang => "!",
            TokenKind::DoubleColon => "::",
            TokenKind::DoubleDot => "..",
            TokenKind::EdgeLeft => "<--",
            TokenKind::EdgeRight => "-->",
            TokenKind::EdgeBidirectional => "<->",
            TokenKind::EdgeUndirected => "---",
            TokenKind::Assign => "=",
            TokenKind::Star => "*",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Tilde => "~",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::DoubleAmpersand => "&&",
            TokenKind::Caret => "^",
            TokenKind::Pipe => "|",
            TokenKind::DoublePipe => "||",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Matches => "=~",
            TokenKind::NotMatches => "!~",
            TokenKind::Contains => "=#",
            TokenKind::NotContains => "!#",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A set of token kinds, used for lookahead tests and for reporting what the
/// parser would have accepted at an error position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Creates a token set from a slice of kinds.
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << (kinds[i] as u8);
            i += 1;
        }
        TokenSet(bits)
    }

    /// Creates a token set containing exactly one kind.
    pub const fn single(kind: TokenKind) -> Self {
        TokenSet(1 << (kind as u8))
    }

    /// Returns `true` if the set contains the given kind.
    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.0 & (1 << (kind as u8)) != 0
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL
            .iter()
            .copied()
            .filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "`{kind}`")?;
        }
        Ok(())
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TokenSet::EMPTY, |set, kind| set.union(TokenSet::single(kind)))
    }
}

/// A lexical token with its kind, text and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Token text. Sigils and quotes are stripped and string escapes are
    /// already decoded.
    pub text: SmolStr,
    /// The span in source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the source slice covered by this token.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}
