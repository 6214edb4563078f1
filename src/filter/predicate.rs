use std::fmt;
use std::sync::Arc;

use crate::data::row::RowBatch;
use crate::data::value::Value;
use crate::expression::ast::Expr;
use crate::expression::eval::eval_column;
use crate::expression::parser::parse_expr;
use crate::foundation::error::FramesResult;

/// Row predicate evaluated against one panel's rows at a time.
///
/// Implementations declare the columns they read up front; the [`RowBatch`] they receive
/// only exposes those columns.
pub trait Predicate: Send + Sync + fmt::Debug {
    /// Columns this predicate reads.
    fn columns(&self) -> Vec<String>;

    /// Evaluate against `batch`.
    ///
    /// `Ok(None)` means "every row matches". A returned column must hold one
    /// [`Value::Bool`] (or [`Value::Na`], read as "no match") per row.
    fn evaluate(&self, batch: &RowBatch) -> FramesResult<Option<Vec<Value>>>;
}

/// Predicate parsed from an infix expression such as `x > 3 && kind == "a"`.
#[derive(Clone, Debug)]
pub struct ExprPredicate {
    source: String,
    expr: Expr,
    columns: Vec<String>,
}

impl ExprPredicate {
    /// Parse `source`.
    pub fn parse(source: &str) -> FramesResult<Self> {
        let expr = parse_expr(source)?;
        let columns = expr.columns();
        Ok(Self {
            source: source.trim().to_owned(),
            expr,
            columns,
        })
    }

    /// The expression text as written.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Predicate for ExprPredicate {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn evaluate(&self, batch: &RowBatch) -> FramesResult<Option<Vec<Value>>> {
        eval_column(&self.expr, batch).map(Some)
    }
}

type PredicateFn = dyn Fn(&RowBatch) -> FramesResult<Option<Vec<Value>>> + Send + Sync;

/// Predicate backed by a closure over declared columns.
#[derive(Clone)]
pub struct FnPredicate {
    columns: Vec<String>,
    f: Arc<PredicateFn>,
}

impl FnPredicate {
    /// Wrap `f`, which may only read `columns` from the batch it receives.
    pub fn new<F>(columns: &[&str], f: F) -> Self
    where
        F: Fn(&RowBatch) -> FramesResult<Option<Vec<Value>>> + Send + Sync + 'static,
    {
        Self {
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for FnPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl Predicate for FnPredicate {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn evaluate(&self, batch: &RowBatch) -> FramesResult<Option<Vec<Value>>> {
        (self.f)(batch)
    }
}
