//! Keyword recognition and classification for IQL.
//!
//! IQL keywords are case-insensitive.

use super::token::TokenKind;

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    match name.to_ascii_uppercase().as_str() {
        // Statement keywords
        "FIND" => Some(TokenKind::Find),
        "WITH" => Some(TokenKind::With),
        "FROM" => Some(TokenKind::From),
        "FILTER" => Some(TokenKind::Filter),
        "BY" => Some(TokenKind::By),
        "ON" => Some(TokenKind::On),
        "HAVING" => Some(TokenKind::Having),
        "LANE" => Some(TokenKind::Lane),
        "DISTINCT" => Some(TokenKind::Distinct),
        "EDGES" => Some(TokenKind::Edges),
        "GROUP" => Some(TokenKind::Group),
        "LABEL" => Some(TokenKind::Label),
        "DEFAULT" => Some(TokenKind::Default),
        "LIMIT" => Some(TokenKind::Limit),
        "ORDER" => Some(TokenKind::Order),
        "ASC" => Some(TokenKind::Asc),
        "DESC" => Some(TokenKind::Desc),

        // Logical operators
        "AND" => Some(TokenKind::And),
        "OR" => Some(TokenKind::Or),
        "NOT" => Some(TokenKind::Not),
        "IN" => Some(TokenKind::In),
        "ALL" => Some(TokenKind::All),
        "AS" => Some(TokenKind::As),
        "OPTIONAL" => Some(TokenKind::Optional),

        // Structural keywords
        "FIRST" => Some(TokenKind::First),
        "HITS" => Some(TokenKind::Hits),
        "DISJOINT" => Some(TokenKind::Disjoint),
        "CONSECUTIVE" => Some(TokenKind::Consecutive),
        "REVERSE" => Some(TokenKind::Reverse),
        "ROOTED" => Some(TokenKind::Rooted),
        "ORDERED" => Some(TokenKind::Ordered),
        "UNORDERED" => Some(TokenKind::Unordered),
        "ADJACENT" => Some(TokenKind::Adjacent),

        // Loop keywords
        "FOREACH" => Some(TokenKind::Foreach),
        "EVEN" => Some(TokenKind::Even),
        "ODD" => Some(TokenKind::Odd),
        "OMIT" => Some(TokenKind::Omit),
        "RANGE" => Some(TokenKind::Range),
        "STEP" => Some(TokenKind::Step),
        "DO" => Some(TokenKind::Do),
        "END" => Some(TokenKind::End),
        "COUNT" => Some(TokenKind::Count),

        // Literals
        "TRUE" => Some(TokenKind::True),
        "FALSE" => Some(TokenKind::False),
        "NULL" => Some(TokenKind::Null),

        // Type names
        "BOOLEAN" => Some(TokenKind::Boolean),
        "STRING" => Some(TokenKind::String),
        "INT" => Some(TokenKind::Int),
        "LONG" => Some(TokenKind::Long),
        "FLOAT" => Some(TokenKind::Float),
        "DOUBLE" => Some(TokenKind::Double),

        _ => None,
    }
}

/// Returns true if the given name is a keyword (case-insensitive).
pub fn is_keyword(name: &str) -> bool {
    lookup_keyword(name).is_some()
}
