use std::cmp::Ordering;

use crate::data::row::RowBatch;
use crate::data::value::Value;
use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::foundation::error::{FramesError, FramesResult};

/// Evaluate `expr` once per row of `batch`, returning one value per row.
pub(crate) fn eval_column(expr: &Expr, batch: &RowBatch) -> FramesResult<Vec<Value>> {
    let n = batch.len();
    match expr {
        Expr::Lit(lit) => Ok(vec![lit_value(lit); n]),
        Expr::Column(name) => Ok(batch.column(name)?.to_vec()),
        Expr::Unary { op, expr } => eval_column(expr, batch)?
            .into_iter()
            .map(|v| unary(*op, v))
            .collect(),
        Expr::Binary { op, left, right } => {
            let l = eval_column(left, batch)?;
            let r = eval_column(right, batch)?;
            l.into_iter()
                .zip(r)
                .map(|(a, b)| binary(*op, a, b))
                .collect()
        }
        Expr::Call { func, args } => {
            let cols = args
                .iter()
                .map(|a| eval_column(a, batch))
                .collect::<FramesResult<Vec<_>>>()?;
            let mut out = Vec::with_capacity(n);
            let mut row_args = Vec::with_capacity(cols.len());
            for i in 0..n {
                row_args.clear();
                row_args.extend(cols.iter().map(|c| c[i].clone()));
                out.push(call(func, &row_args)?);
            }
            Ok(out)
        }
    }
}

fn lit_value(lit: &Lit) -> Value {
    match lit {
        Lit::Num(v) => Value::Num(*v),
        Lit::Bool(v) => Value::Bool(*v),
        Lit::Text(v) => Value::Text(v.clone()),
        Lit::Na => Value::Na,
    }
}

fn type_error(op: &str, a: &Value, b: Option<&Value>) -> FramesError {
    match b {
        Some(b) => FramesError::expression(format!(
            "cannot apply '{op}' to {} and {}",
            a.type_name(),
            b.type_name()
        )),
        None => FramesError::expression(format!("cannot apply '{op}' to {}", a.type_name())),
    }
}

fn unary(op: UnaryOp, v: Value) -> FramesResult<Value> {
    match (op, v) {
        (_, Value::Na) => Ok(Value::Na),
        (UnaryOp::Neg, Value::Num(x)) => Ok(Value::Num(-x)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, v) => Err(type_error("-", &v, None)),
        (UnaryOp::Not, v) => Err(type_error("!", &v, None)),
    }
}

fn binary(op: BinaryOp, a: Value, b: Value) -> FramesResult<Value> {
    match op {
        BinaryOp::And => logical(a, b, "&&", |x, y| match (x, y) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        }),
        BinaryOp::Or => logical(a, b, "||", |x, y| match (x, y) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        }),
        _ if a.is_na() || b.is_na() => Ok(Value::Na),
        BinaryOp::Add => arith(a, b, "+", |x, y| x + y),
        BinaryOp::Sub => arith(a, b, "-", |x, y| x - y),
        BinaryOp::Mul => arith(a, b, "*", |x, y| x * y),
        BinaryOp::Div => arith(a, b, "/", |x, y| x / y),
        BinaryOp::Mod => arith(a, b, "%", |x, y| x % y),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::Ne => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => compare(a, b, "<", Ordering::is_lt),
        BinaryOp::Le => compare(a, b, "<=", Ordering::is_le),
        BinaryOp::Gt => compare(a, b, ">", Ordering::is_gt),
        BinaryOp::Ge => compare(a, b, ">=", Ordering::is_ge),
    }
}

fn logical(
    a: Value,
    b: Value,
    op: &str,
    f: impl Fn(Option<bool>, Option<bool>) -> Option<bool>,
) -> FramesResult<Value> {
    let as_logical = |v: &Value| match v {
        Value::Na => Ok(None),
        Value::Bool(x) => Ok(Some(*x)),
        _ => Err(type_error(op, &a, Some(&b))),
    };
    let x = as_logical(&a)?;
    let y = as_logical(&b)?;
    Ok(f(x, y).map(Value::Bool).unwrap_or(Value::Na))
}

fn arith(a: Value, b: Value, op: &str, f: impl Fn(f64, f64) -> f64) -> FramesResult<Value> {
    match (&a, &b) {
        (Value::Num(x), Value::Num(y)) => Ok(Value::Num(f(*x, *y))),
        _ => Err(type_error(op, &a, Some(&b))),
    }
}

fn compare(
    a: Value,
    b: Value,
    op: &str,
    f: impl Fn(Ordering) -> bool,
) -> FramesResult<Value> {
    let ord = match (&a, &b) {
        (Value::Num(x), Value::Num(y)) => x.partial_cmp(y),
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        _ => return Err(type_error(op, &a, Some(&b))),
    };
    Ok(ord.map(|o| Value::Bool(f(o))).unwrap_or(Value::Na))
}

fn call(func: &str, args: &[Value]) -> FramesResult<Value> {
    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(FramesError::expression(format!(
                "{func}() expects {n} argument(s), got {}",
                args.len()
            )))
        }
    };

    match func {
        "is_na" => {
            arity(1)?;
            Ok(Value::Bool(args[0].is_na()))
        }
        "abs" => {
            arity(1)?;
            match &args[0] {
                Value::Na => Ok(Value::Na),
                Value::Num(x) => Ok(Value::Num(x.abs())),
                other => Err(type_error("abs", other, None)),
            }
        }
        "min" | "max" => {
            arity(2)?;
            match (&args[0], &args[1]) {
                (Value::Na, _) | (_, Value::Na) => Ok(Value::Na),
                (Value::Num(x), Value::Num(y)) => Ok(Value::Num(if func == "min" {
                    x.min(*y)
                } else {
                    x.max(*y)
                })),
                (a, b) => Err(type_error(func, a, Some(b))),
            }
        }
        "one_of" => {
            let Some((needle, haystack)) = args.split_first() else {
                return Err(FramesError::expression(
                    "one_of() expects at least 1 argument",
                ));
            };
            if needle.is_na() {
                return Ok(Value::Na);
            }
            Ok(Value::Bool(haystack.iter().any(|v| v == needle)))
        }
        other => Err(FramesError::expression(format!(
            "unknown function '{other}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
