//! Predicate expression language.
//!
//! A small infix language over row columns (`x > 3 && one_of(kind, "a", "b")`), evaluated
//! column-wise against a [`RowBatch`](crate::RowBatch) with NA propagation.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
