use std::collections::BTreeMap;

use crate::data::membership::{FilterBits, MembershipTag};
use crate::data::row::{Row, RowBatch};
use crate::filter::spec::{FilterSet, FilterSpec};
use crate::foundation::core::PanelId;
use crate::foundation::error::{FramesError, FramesResult};

/// Filter membership of one panel's rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelMembership {
    /// Every filter matches every row: no partitioning needed, every frame shows the
    /// panel's rows unchanged.
    All,
    /// Matching filters per row, in the panel's row order.
    Rows(Vec<FilterBits>),
}

impl PanelMembership {
    /// Return `true` for the no-partitioning encoding.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Membership of a whole layer, keyed by panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerMembership {
    /// Per-panel membership.
    pub panels: BTreeMap<PanelId, PanelMembership>,
}

/// Evaluates filter predicates per panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Evaluate every filter against every panel of `rows`.
    #[tracing::instrument(skip_all, fields(rows = rows.len(), filters = filters.len()))]
    pub fn evaluate(rows: &[Row], filters: &FilterSet) -> FramesResult<LayerMembership> {
        let mut out = LayerMembership::default();
        for (panel, panel_rows) in rows_by_panel(rows) {
            let membership = Self::evaluate_panel(&panel_rows, filters)?;
            tracing::debug!(
                %panel,
                rows = panel_rows.len(),
                all = membership.is_all(),
                "panel evaluated"
            );
            out.panels.insert(panel, membership);
        }
        Ok(out)
    }

    /// Evaluate every filter against one panel's rows.
    pub fn evaluate_panel(rows: &[&Row], filters: &FilterSet) -> FramesResult<PanelMembership> {
        let masks = filters
            .iter()
            .map(|f| filter_mask(f, rows))
            .collect::<FramesResult<Vec<_>>>()?;

        if masks.iter().all(|m| m.iter().all(|&b| b)) {
            return Ok(PanelMembership::All);
        }

        let per_row = (0..rows.len())
            .map(|r| {
                FilterBits::from_indices(
                    masks
                        .iter()
                        .enumerate()
                        .filter(|(_, m)| m[r])
                        .map(|(i, _)| i + 1),
                )
            })
            .collect();
        Ok(PanelMembership::Rows(per_row))
    }
}

/// Evaluate `filters` over `rows` and write each row's membership tag.
///
/// Rows of fast-path panels are left untagged so they pass through partitioning.
pub fn assign_filters(rows: &mut [Row], filters: &FilterSet) -> FramesResult<LayerMembership> {
    let membership = FilterEvaluator::evaluate(rows, filters)?;

    let mut cursor: BTreeMap<PanelId, usize> = BTreeMap::new();
    for row in rows.iter_mut() {
        let slot = cursor.entry(row.panel).or_default();
        row.membership = match membership.panels.get(&row.panel) {
            Some(PanelMembership::Rows(bits)) => Some(MembershipTag::new(
                row.panel,
                bits.get(*slot).cloned().unwrap_or_default(),
            )),
            Some(PanelMembership::All) | None => None,
        };
        *slot += 1;
    }
    Ok(membership)
}

fn rows_by_panel(rows: &[Row]) -> BTreeMap<PanelId, Vec<&Row>> {
    let mut out: BTreeMap<PanelId, Vec<&Row>> = BTreeMap::new();
    for row in rows {
        out.entry(row.panel).or_default().push(row);
    }
    out
}

fn filter_mask(filter: &FilterSpec, rows: &[&Row]) -> FramesResult<Vec<bool>> {
    let predicate = filter.predicate();
    let batch = RowBatch::project(rows.iter().copied(), &predicate.columns());
    let Some(values) = predicate.evaluate(&batch)? else {
        return Ok(vec![true; rows.len()]);
    };

    if values.len() != rows.len() {
        return Err(FramesError::invalid_filter_result(format!(
            "filter '{}' returned {} values for {} rows",
            filter.name(),
            values.len(),
            rows.len()
        )));
    }
    values
        .iter()
        .map(|v| match v.as_bool() {
            Some(b) => Ok(b),
            None if v.is_na() => Ok(false),
            None => Err(FramesError::invalid_filter_result(format!(
                "filter '{}' must evaluate to a boolean, got {}",
                filter.name(),
                v.type_name()
            ))),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/filter/evaluator.rs"]
mod tests;
