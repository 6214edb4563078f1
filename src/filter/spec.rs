use std::collections::BTreeSet;
use std::sync::Arc;

use crate::filter::predicate::{ExprPredicate, Predicate};
use crate::foundation::error::{FramesError, FramesResult};

/// One named animation state: a predicate plus the text shown in labels.
#[derive(Clone, Debug)]
pub struct FilterSpec {
    name: String,
    expression: String,
    predicate: Arc<dyn Predicate>,
}

impl FilterSpec {
    /// Build a filter from an arbitrary predicate.
    pub fn new(
        name: impl Into<String>,
        expression: impl Into<String>,
        predicate: impl Predicate + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Parse an expression filter. Unnamed filters are named after their expression.
    pub fn parse(name: Option<&str>, expression: &str) -> FramesResult<Self> {
        let predicate = ExprPredicate::parse(expression)?;
        let expression = predicate.source().to_owned();
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| expression.clone());
        Ok(Self {
            name,
            expression,
            predicate: Arc::new(predicate),
        })
    }

    /// Filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Predicate.
    pub fn predicate(&self) -> &dyn Predicate {
        self.predicate.as_ref()
    }
}

/// Ordered, uniquely named filters. The order is the transition order.
#[derive(Clone, Debug)]
pub struct FilterSet {
    filters: Vec<FilterSpec>,
}

impl FilterSet {
    /// Validate and wrap `filters`: at least two, names unique and non-empty.
    pub fn new(filters: Vec<FilterSpec>) -> FramesResult<Self> {
        if filters.len() < 2 {
            return Err(FramesError::config(format!(
                "transition needs at least 2 filters, got {}",
                filters.len()
            )));
        }
        let mut seen = BTreeSet::new();
        for f in &filters {
            if f.name.is_empty() {
                return Err(FramesError::config("filter names must be non-empty"));
            }
            if !seen.insert(f.name.as_str()) {
                return Err(FramesError::config(format!(
                    "duplicate filter name '{}'",
                    f.name
                )));
            }
        }
        Ok(Self { filters })
    }

    /// Number of filters (`k`).
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Always `false`: a valid set holds at least two filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in transition order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterSpec> {
        self.filters.iter()
    }

    /// Filter names in order.
    pub fn names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name.clone()).collect()
    }

    /// Expression texts in order.
    pub fn expressions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.expression.clone()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/spec.rs"]
mod tests;
