//! Expression Parser Tests
//!
//! Covers operator precedence, associativity, the previous-token predicates
//! of call/list/annotation access, casts, list literals, loops and the
//! fail-fast error behaviour of the expression grammar.

mod common;

use common::{expression, expression_error};
use iql_parser::ParseErrorKind;
use iql_parser::TokenKind;
use iql_parser::ast::{
    AdditiveOperator, AssignmentTarget, BitwiseOperator, Expression, ExpressionKind,
    MultiplicativeOperator, Parity, Primary, PrimitiveType, StringOperator,
};

fn primary(primary: Primary) -> Expression {
    ExpressionKind::Primary(primary).at(0..0)
}

fn int(text: &str) -> Expression {
    primary(Primary::Integer(text.into()))
}

fn ident(name: &str) -> Expression {
    primary(Primary::Identifier(name.into()))
}

fn boxed(kind: ExpressionKind) -> Box<Expression> {
    Box::new(kind.at(0..0))
}

// ===== Precedence =====

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expected = ExpressionKind::Additive(
        AdditiveOperator::Add,
        Box::new(int("1")),
        boxed(ExpressionKind::Multiplicative(
            MultiplicativeOperator::Multiply,
            Box::new(int("2")),
            Box::new(int("3")),
        )),
    );
    assert_eq!(expression("1+2*3").node, expected);

    let expected = ExpressionKind::Additive(
        AdditiveOperator::Add,
        boxed(ExpressionKind::Multiplicative(
            MultiplicativeOperator::Multiply,
            Box::new(int("1")),
            Box::new(int("2")),
        )),
        Box::new(int("3")),
    );
    assert_eq!(expression("1*2+3").node, expected);
}

#[test]
fn full_precedence_ladder() {
    // a OR b AND c == d =~ e < f | g + h * i
    let parsed = expression("a or b and c == d =~ e < f | g + h * i");
    let ExpressionKind::Disjunction(_, rhs) = parsed.node else {
        panic!("expected disjunction at the top");
    };
    let ExpressionKind::Conjunction(_, rhs) = rhs.node else {
        panic!("expected conjunction");
    };
    let ExpressionKind::Equality(_, _, rhs) = rhs.node else {
        panic!("expected equality");
    };
    let ExpressionKind::StringOp(StringOperator::Matches, _, rhs) = rhs.node else {
        panic!("expected string operator");
    };
    let ExpressionKind::Comparison(_, _, rhs) = rhs.node else {
        panic!("expected comparison");
    };
    let ExpressionKind::Bitwise(BitwiseOperator::Or, _, rhs) = rhs.node else {
        panic!("expected bitwise or");
    };
    let ExpressionKind::Additive(_, _, rhs) = rhs.node else {
        panic!("expected additive");
    };
    assert!(matches!(rhs.node, ExpressionKind::Multiplicative(..)));
}

#[test]
fn bitwise_band_is_left_associative() {
    let parsed = expression("a & b && c ^ d");
    let ExpressionKind::Bitwise(BitwiseOperator::Xor, lhs, _) = parsed.node else {
        panic!("expected xor at the top");
    };
    let ExpressionKind::Bitwise(BitwiseOperator::DoubleAnd, lhs, _) = lhs.node else {
        panic!("expected `&&` below it");
    };
    assert!(matches!(lhs.node, ExpressionKind::Bitwise(BitwiseOperator::And, ..)));
}

#[test]
fn subtraction_is_left_associative() {
    let parsed = expression("10 - 4 - 3");
    let ExpressionKind::Additive(AdditiveOperator::Subtract, lhs, rhs) = parsed.node else {
        panic!("expected subtraction");
    };
    assert_eq!(*rhs, int("3"));
    assert!(matches!(lhs.node, ExpressionKind::Additive(AdditiveOperator::Subtract, ..)));
}

// ===== Ternary =====

#[test]
fn ternary_is_right_associative() {
    let expected = ExpressionKind::Ternary {
        condition: Box::new(ident("a")),
        then_branch: Box::new(ident("b")),
        else_branch: boxed(ExpressionKind::Ternary {
            condition: Box::new(ident("c")),
            then_branch: Box::new(ident("d")),
            else_branch: Box::new(ident("e")),
        }),
    };
    assert_eq!(expression("a?b:c?d:e").node, expected);
}

#[test]
fn ternary_condition_takes_the_whole_disjunction() {
    let parsed = expression("x > 1 or y ? 1 : 2");
    let ExpressionKind::Ternary { condition, .. } = parsed.node else {
        panic!("expected ternary");
    };
    assert!(matches!(condition.node, ExpressionKind::Disjunction(..)));
}

// ===== Postfix predicates =====

#[test]
fn call_requires_identifier_before_parenthesis() {
    let parsed = expression("foo(1,2)");
    let ExpressionKind::MethodInvocation(target, arguments) = parsed.node else {
        panic!("expected invocation");
    };
    assert_eq!(*target, ident("foo"));
    assert_eq!(arguments, vec![int("1"), int("2")]);

    let err = expression_error("(1+2)(3)");
    assert_eq!(err.found, TokenKind::LParen);
    assert_eq!(err.span, 5..6);
}

#[test]
fn list_and_annotation_access_after_parenthesis() {
    let parsed = expression("(1+2)[3]");
    assert!(matches!(parsed.node, ExpressionKind::ListAccess(..)));

    let parsed = expression("(x){\"pos\"}");
    assert!(matches!(parsed.node, ExpressionKind::AnnotationAccess(..)));
}

#[test]
fn postfix_access_on_variables_and_members() {
    let parsed = expression("@list[0]");
    let ExpressionKind::ListAccess(target, indices) = parsed.node else {
        panic!("expected list access on a variable");
    };
    assert_eq!(*target, primary(Primary::Variable("list".into())));
    assert_eq!(indices, vec![int("0")]);

    let parsed = expression("$x[1, 2]");
    let ExpressionKind::ListAccess(target, indices) = parsed.node else {
        panic!("expected list access on a member");
    };
    assert_eq!(*target, primary(Primary::Member("x".into())));
    assert_eq!(indices.len(), 2);

    let parsed = expression("$x{\"key\"}");
    let ExpressionKind::AnnotationAccess(target, keys) = parsed.node else {
        panic!("expected annotation access on a member");
    };
    assert_eq!(*target, primary(Primary::Member("x".into())));
    assert_eq!(keys, vec![primary(Primary::String("key".into()))]);

    let parsed = expression("@f(1)");
    let ExpressionKind::MethodInvocation(target, arguments) = parsed.node else {
        panic!("expected invocation on a variable");
    };
    assert_eq!(*target, primary(Primary::Variable("f".into())));
    assert_eq!(arguments, vec![int("1")]);

    let parsed = expression("$t{\"pos\"} == \"NN\" and @tokens[0] != $t");
    assert!(matches!(parsed.node, ExpressionKind::Conjunction(..)));
}

#[test]
fn path_then_call_then_list() {
    let parsed = expression("$x.tokens.get(1)[0]");
    let ExpressionKind::ListAccess(target, _) = parsed.node else {
        panic!("expected list access");
    };
    let ExpressionKind::MethodInvocation(target, _) = target.node else {
        panic!("expected invocation");
    };
    let ExpressionKind::PathAccess(_, name) = target.node else {
        panic!("expected path access");
    };
    assert_eq!(name, "get");
}

#[test]
fn empty_call_arguments() {
    let parsed = expression("now()");
    assert!(matches!(
        parsed.node,
        ExpressionKind::MethodInvocation(_, ref arguments) if arguments.is_empty()
    ));
}

// ===== Prefix forms =====

#[test]
fn casts_and_typed_lists() {
    let parsed = expression("(int) $x.len + 1");
    let ExpressionKind::Additive(_, lhs, _) = parsed.node else {
        panic!("cast should bind tighter than `+`");
    };
    assert!(matches!(lhs.node, ExpressionKind::Cast(PrimitiveType::Int, _)));

    let parsed = expression("string[] {\"a\", \"b\"}");
    let ExpressionKind::Primary(Primary::List(list)) = parsed.node else {
        panic!("expected list literal");
    };
    assert_eq!(list.element_type, Some(PrimitiveType::String));
    assert_eq!(list.items.len(), 2);
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(expression("NOT x AND TRUE"), expression("not x and true"));
    assert_eq!(expression("x Or Null"), expression("x OR NULL"));
}

#[test]
fn literals() {
    assert_eq!(expression("1_000").node, ExpressionKind::Primary(Primary::Integer("1_000".into())));
    assert_eq!(expression("2.5").node, ExpressionKind::Primary(Primary::Float("2.5".into())));
    assert_eq!(
        expression("\"a\\\"b\"").node,
        ExpressionKind::Primary(Primary::String("a\"b".into()))
    );
    assert_eq!(
        expression("ns::name").node,
        ExpressionKind::Primary(Primary::QualifiedIdentifier("ns".into(), "name".into()))
    );
    assert_eq!(
        expression("@count").node,
        ExpressionKind::Primary(Primary::Variable("count".into()))
    );
}

#[test]
fn set_predicates_and_assignment() {
    let parsed = expression("$x.pos * not in {\"NN\", \"NE\"}");
    let ExpressionKind::SetPredicate { all, negated, .. } = parsed.node else {
        panic!("expected set predicate");
    };
    assert!(all);
    assert!(negated);

    let parsed = expression("$x.lemma as optional @lemma");
    let ExpressionKind::Assignment {
        optional, target, ..
    } = parsed.node
    else {
        panic!("expected assignment");
    };
    assert!(optional);
    assert_eq!(target, AssignmentTarget::Variable("lemma".into()));
}

// ===== Loops =====

#[test]
fn loop_with_every_clause() {
    let parsed = expression("foreach @x as @i even omit c1 range(0,5) step(1,1) do c2 end");
    let ExpressionKind::ForEach(body) = parsed.node else {
        panic!("expected loop");
    };
    assert_eq!(body.variable, "i");
    assert_eq!(body.control.parity, Some(Parity::Even));
    assert_eq!(body.control.omit, Some(ident("c1")));
    assert_eq!(body.control.range.as_ref().map(|r| r.upper.clone()), Some(int("5")));
    assert!(body.control.step.is_some());
    assert_eq!(body.control.action, Some(ident("c2")));
}

#[test]
fn loop_clauses_out_of_order_fail() {
    let err = expression_error("foreach @x as @i step(1,1) range(0,5) end");
    assert_eq!(err.found, TokenKind::Range);
    assert!(err.expected.contains(TokenKind::End));
}

#[test]
fn loop_with_counters() {
    let parsed = expression("foreach $s.tokens as @t end count $t.pos == \"NN\" as @nouns");
    let ExpressionKind::ForEach(body) = parsed.node else {
        panic!("expected loop");
    };
    assert!(body.control.is_empty());
    assert_eq!(body.counters.len(), 1);
    assert_eq!(body.counters[0].variable, "nouns");
}

// ===== Fail-fast =====

#[test]
fn doubled_operator_fails_at_second_operator() {
    let err = expression_error("1 + + 2");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.found, TokenKind::Plus);
    assert_eq!(err.span, 4..5);
}

#[test]
fn unclosed_parenthesis_is_end_of_input() {
    let err = expression_error("(1 + 2");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert!(err.expected.contains(TokenKind::RParen));
}

#[test]
fn dangling_ternary() {
    let err = expression_error("a ? b");
    assert!(err.is_eof());
    assert!(err.expected.contains(TokenKind::Colon));
}

// ===== Idempotence =====

#[test]
fn reparsing_yields_equal_trees() {
    let sources = [
        "$x.pos == \"NN\" && $y.pos != \"VV\"",
        "(long) a[1] * -2 + ~b",
        "foreach {1, 2, 3} as @n odd do @s + @n end",
        "x ? {1} : (float) y",
    ];
    for source in sources {
        assert_eq!(expression(source), expression(source), "{source}");
    }
}

#[test]
fn whitespace_does_not_change_the_tree() {
    assert_eq!(expression("1+2*3"), expression("1 +  2 * 3"));
    assert_ne!(expression("1+2*3").span, expression("1 +  2 * 3").span);
}
