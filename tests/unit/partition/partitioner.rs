use super::*;
use crate::data::membership::{FilterBits, MembershipTag};
use crate::foundation::core::PanelId;
use crate::tween::effect::{Effect, EffectChain};

fn tagged(group: Group, x: f64, filters: &[usize]) -> Row {
    let mut row = Row::new(PanelId(1), group)
        .with("x", x)
        .with("alpha", 1.0);
    row.membership = Some(MembershipTag::new(
        PanelId(1),
        FilterBits::from_indices(filters.iter().copied()),
    ));
    row
}

fn xs(rows: &[Row]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.num("x")).collect()
}

fn sample() -> Vec<Row> {
    vec![
        tagged(Group::Id(1), 1.0, &[1]),
        tagged(Group::Id(2), 2.0, &[1, 2]),
        tagged(Group::Id(3), 3.0, &[]),
    ]
}

#[test]
fn untagged_rows_pass_through() {
    let rows = vec![Row::new(PanelId(1), Group::Ungrouped).with("x", 1.0)];
    let p = RowSetPartitioner::partition(rows.clone(), 2, Geometry::Point, false, None);
    assert_eq!(p, Partition::PassThrough(rows));
    assert!(p.is_pass_through());
}

#[test]
fn drop_policy_keeps_only_matching_rows() {
    let Partition::Subsets(subsets) =
        RowSetPartitioner::partition(sample(), 2, Geometry::Point, false, None)
    else {
        panic!("expected subsets");
    };
    assert_eq!(subsets.len(), 2);
    assert_eq!(xs(&subsets[0]), vec![1.0, 2.0]);
    assert_eq!(xs(&subsets[1]), vec![2.0]);
    assert!(subsets.iter().flatten().all(|r| r.membership.is_none()));
}

#[test]
fn keep_policy_replaces_excluded_rows_with_their_exit_state() {
    let exit = EffectChain::new(vec![Effect::Fade]);
    let Partition::Subsets(subsets) =
        RowSetPartitioner::partition(sample(), 2, Geometry::Point, true, Some(&exit))
    else {
        panic!("expected subsets");
    };
    assert_eq!(xs(&subsets[1]), vec![1.0, 2.0, 3.0]);
    let alphas = subsets[1]
        .iter()
        .map(|r| r.num("alpha").unwrap())
        .collect::<Vec<_>>();
    assert_eq!(alphas, vec![0.0, 1.0, 0.0]);
    for (kept, dropped) in subsets.iter().zip([vec![1.0, 2.0], vec![2.0]]) {
        assert!(kept.len() >= dropped.len());
    }
}

#[test]
fn keep_without_exit_state_falls_back_to_matching_rows() {
    let empty = EffectChain::default();
    for exit in [None, Some(&empty as &dyn RowEffect)] {
        let Partition::Subsets(subsets) =
            RowSetPartitioner::partition(sample(), 2, Geometry::Point, true, exit)
        else {
            panic!("expected subsets");
        };
        assert_eq!(xs(&subsets[1]), vec![2.0]);
    }
}

#[test]
fn ungrouped_points_get_sequential_ids() {
    let rows = vec![
        tagged(Group::Ungrouped, 1.0, &[1]),
        tagged(Group::Id(7), 2.0, &[1]),
        tagged(Group::Ungrouped, 3.0, &[2]),
    ];
    let Partition::Subsets(subsets) =
        RowSetPartitioner::partition(rows.clone(), 2, Geometry::Point, false, None)
    else {
        panic!("expected subsets");
    };
    let groups = subsets[0].iter().map(|r| r.group.clone()).collect::<Vec<_>>();
    assert_eq!(groups, vec![Group::Id(8), Group::Id(7)]);
    assert_eq!(subsets[1][0].group, Group::Id(9));

    let Partition::Subsets(paths) =
        RowSetPartitioner::partition(rows, 2, Geometry::Path, false, None)
    else {
        panic!("expected subsets");
    };
    assert!(paths[0][0].group.is_ungrouped());
}
