//! AST foundation types: spans and spanned nodes.
//!
//! Spans exist for diagnostics only. Equality on every AST node ignores them,
//! so two parses of the same text at different offsets compare equal.

use std::ops::Range;

/// A span representing a range in source text.
/// This is the canonical span type used throughout the parser.
pub type Span = Range<usize>;

/// A value with an associated source span.
///
/// `Spanned<T>` pairs a syntax node or token with its location in source text.
/// Equality compares the wrapped value only.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// The span in source text where this node appears.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Maps the inner value while preserving the span.
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }

    /// Extracts the inner value, discarding the span.
    pub fn into_inner(self) -> T {
        self.node
    }

    /// Returns a reference to the span.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T: Eq> Eq for Spanned<T> {}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.node
    }
}

impl<T> AsMut<T> for Spanned<T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.node
    }
}

/// Implements `PartialEq`/`Eq` for a struct node, comparing every field
/// except `span`.
///
/// The field list must be exhaustive; adding a field to the struct without
/// listing it here is a compile error.
macro_rules! span_insensitive_eq {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                let $ty { $($field,)* span: _ } = self;
                $( *$field == other.$field && )* true
            }
        }

        impl Eq for $ty {}
    };
}

pub(crate) use span_insensitive_eq;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basic_properties() {
        let span: Span = 5..10;
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn spanned_map() {
        let spanned = Spanned::new(5, 10..15);
        let mapped = spanned.map(|x| x * 2);
        assert_eq!(mapped.node, 10);
        assert_eq!(mapped.span, 10..15);
    }

    #[test]
    fn spanned_into_inner() {
        let spanned = Spanned::new("hello", 0..5);
        assert_eq!(spanned.into_inner(), "hello");
    }

    #[test]
    fn spanned_accessors() {
        let mut spanned = Spanned::new(100, 20..25);
        assert_eq!(*spanned.as_ref(), 100);
        assert_eq!(spanned.span(), &(20..25));

        *spanned.as_mut() = 200;
        assert_eq!(spanned.node, 200);
    }

    #[test]
    fn spanned_equality_ignores_span() {
        assert_eq!(Spanned::new("test", 0..4), Spanned::new("test", 10..14));
        assert_ne!(Spanned::new("test", 0..4), Spanned::new("tent", 0..4));
    }

    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        depth: u32,
        span: Span,
    }

    span_insensitive_eq!(Probe { name, depth });

    #[test]
    fn struct_equality_ignores_span() {
        let a = Probe { name: "a", depth: 1, span: 0..1 };
        let b = Probe { name: "a", depth: 1, span: 7..8 };
        let c = Probe { name: "a", depth: 2, span: 0..1 };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.span.start + b.span.start, 7);
    }
}
