use crate::data::row::Row;
use crate::foundation::core::Group;
use crate::tween::effect::RowEffect;
use crate::tween::geometry::Geometry;

/// Rows of one render unit split by filter.
#[derive(Clone, Debug, PartialEq)]
pub enum Partition {
    /// No membership tags: the rows show unchanged in every frame.
    PassThrough(Vec<Row>),
    /// One subset per filter, in filter order.
    Subsets(Vec<Vec<Row>>),
}

impl Partition {
    /// Return `true` for [`Partition::PassThrough`].
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough(_))
    }
}

/// Splits a render unit's rows into per-filter subsets.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowSetPartitioner;

impl RowSetPartitioner {
    /// Partition `rows` over `filter_count` filters.
    ///
    /// With `keep`, rows outside a filter are replaced by their `exit` state instead of being
    /// dropped; when there is no exit state the filter falls back to its matching rows.
    /// Untagged rows in a tagged unit belong to every filter.
    pub fn partition(
        rows: Vec<Row>,
        filter_count: usize,
        geometry: Geometry,
        keep: bool,
        exit: Option<&dyn RowEffect>,
    ) -> Partition {
        if rows.iter().all(|r| r.membership.is_none()) {
            return Partition::PassThrough(rows);
        }

        let mut rows = rows;
        if geometry.is_point_like() {
            number_ungrouped(&mut rows);
        }
        let tags = rows
            .iter_mut()
            .map(|r| r.membership.take())
            .collect::<Vec<_>>();

        let subsets = (1..=filter_count)
            .map(|i| {
                let included = tags
                    .iter()
                    .map(|t| t.as_ref().is_none_or(|t| t.filters.contains(i)))
                    .collect::<Vec<_>>();
                subset(&rows, &included, keep, exit)
            })
            .collect();
        Partition::Subsets(subsets)
    }
}

fn subset(
    rows: &[Row],
    included: &[bool],
    keep: bool,
    exit: Option<&dyn RowEffect>,
) -> Vec<Row> {
    let matching = || {
        rows.iter()
            .zip(included)
            .filter(|(_, inc)| **inc)
            .map(|(r, _)| r.clone())
            .collect::<Vec<_>>()
    };
    if !keep || included.iter().all(|&inc| inc) {
        return matching();
    }

    let excluded = rows
        .iter()
        .zip(included)
        .filter(|(_, inc)| !**inc)
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>();
    let exited = match exit.and_then(|e| e.apply(&excluded)) {
        Some(v) if !v.is_empty() => v,
        _ => return matching(),
    };

    let mut exited = exited.into_iter();
    let mut out = Vec::with_capacity(rows.len());
    for (row, &inc) in rows.iter().zip(included) {
        if inc {
            out.push(row.clone());
        } else if let Some(gone) = exited.next() {
            out.push(gone);
        }
    }
    out.extend(exited);
    out
}

/// Give every ungrouped row its own id, after the largest id already in use.
fn number_ungrouped(rows: &mut [Row]) {
    let mut next = rows.iter().filter_map(|r| r.group.id()).max().unwrap_or(0) + 1;
    for row in rows.iter_mut().filter(|r| r.group.is_ungrouped()) {
        row.group = Group::Id(next);
        next += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/partition/partitioner.rs"]
mod tests;
