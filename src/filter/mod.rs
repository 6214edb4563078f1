/// Per-panel predicate evaluation and membership tagging.
pub mod evaluator;
/// Predicate trait and built-in predicates.
pub mod predicate;
/// Named filters and validated filter sets.
pub mod spec;
