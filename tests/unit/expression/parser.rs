use super::*;

#[test]
fn parses_arithmetic_precedence() {
    let e = parse_expr("1+2*3").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Add,
            right,
            ..
        } => assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn and_binds_tighter_than_or() {
    let e = parse_expr("a > 1 || b < 2 && c == 3").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Or,
            right,
            ..
        } => assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn parses_calls_and_collects_columns() {
    let e = parse_expr("one_of(species, 'setosa', \"virginica\") && !is_na(x) && x > y").unwrap();
    assert_eq!(e.columns(), vec!["species", "x", "y"]);
}

#[test]
fn rejects_trailing_tokens_and_bad_call_targets() {
    assert!(parse_expr("x > 1 2").is_err());
    assert!(parse_expr("1(2)").is_err());
    assert!(parse_expr("x >").is_err());
    assert!(parse_expr("").is_err());
}
