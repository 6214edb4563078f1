use super::*;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::membership::{FilterBits, MembershipTag};
use crate::foundation::core::{Group, PanelId};
use crate::partition::partitioner::RowSetPartitioner;
use crate::schedule::scheduler::FrameScheduler;
use crate::tween::effect::{Effect, EffectChain, RowEffect};

fn names(k: usize) -> Vec<String> {
    (1..=k).map(|i| format!("f{i}")).collect()
}

fn schedule(
    state: &[f64],
    transition: &[f64],
    k: usize,
    frames: u64,
    wrap: bool,
) -> FrameSchedule {
    FrameScheduler::distribute(state, transition, frames, wrap, &names(k), &names(k)).unwrap()
}

fn tagged(group: u64, filters: &[usize]) -> Row {
    let mut row = Row::new(PanelId(1), Group::Id(group))
        .with("x", group as f64)
        .with("alpha", 1.0);
    row.membership = Some(MembershipTag::new(
        PanelId(1),
        FilterBits::from_indices(filters.iter().copied()),
    ));
    row
}

fn rows() -> Vec<Row> {
    vec![tagged(1, &[1]), tagged(2, &[1, 2]), tagged(3, &[])]
}

fn per_frame(out: &[Row]) -> BTreeMap<u64, Vec<&Row>> {
    let mut frames: BTreeMap<u64, Vec<&Row>> = BTreeMap::new();
    for row in out {
        frames.entry(row.group.frame().unwrap()).or_default().push(row);
    }
    frames
}

fn counts(out: &[Row], nframes: u64) -> Vec<usize> {
    let frames = per_frame(out);
    (1..=nframes)
        .map(|f| frames.get(&f).map_or(0, Vec::len))
        .collect()
}

fn run(keep: bool, exit: Option<Arc<EffectChain>>, s: &FrameSchedule) -> Vec<Row> {
    let partition = RowSetPartitioner::partition(
        rows(),
        s.filter_count(),
        Geometry::Point,
        keep,
        exit.as_deref().map(|e| e as &dyn RowEffect),
    );
    let opts = TweenOptions {
        exit: exit.map(|e| e as Arc<dyn RowEffect>),
        ..TweenOptions::default()
    };
    Interpolator::run(partition, s, &opts, Geometry::Point).unwrap()
}

#[test]
fn two_filters_without_wrap_end_held_on_the_second_filter() {
    let s = schedule(&[1.0], &[1.0], 2, 6, false);
    assert_eq!(s.state_lengths, vec![2, 2]);
    assert_eq!(s.transition_lengths, vec![2, 0]);

    let out = run(false, None, &s);
    assert_eq!(counts(&out, 6), vec![2, 2, 1, 1, 1, 1]);
    let last = &per_frame(&out)[&6];
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].group.to_string(), "2_6");
}

#[test]
fn wrapped_schedule_drops_the_seam_frame() {
    let s = schedule(&[2.0], &[5.0], 3, 30, true);
    let rows = vec![tagged(1, &[1]), tagged(2, &[2]), tagged(3, &[3])];
    let partition = RowSetPartitioner::partition(rows, 3, Geometry::Point, false, None);
    let opts = TweenOptions {
        enter: Some(Arc::new(Effect::Fade)),
        exit: Some(Arc::new(Effect::Fade)),
        ..TweenOptions::default()
    };
    let out = Interpolator::run(partition, &s, &opts, Geometry::Point).unwrap();

    let frames = per_frame(&out);
    assert_eq!(frames.keys().copied().max(), Some(30));
    assert_eq!(frames.len(), 30);
    // Holds show exactly one filter's row.
    for f in 1..=3 {
        assert_eq!(frames[&f].len(), 1);
        assert_eq!(frames[&f][0].num("x"), Some(1.0));
    }
    assert_eq!(frames[&12][0].num("x"), Some(2.0));
    assert_eq!(frames[&22][0].num("x"), Some(3.0));
}

#[test]
fn keep_never_shows_fewer_rows_than_drop() {
    let s = schedule(&[1.0], &[1.0], 2, 12, true);
    let exit = Arc::new(EffectChain::new(vec![Effect::Fade]));
    let dropped = counts(&run(false, None, &s), 12);
    let kept = counts(&run(true, Some(exit), &s), 12);
    for (k, d) in kept.iter().zip(&dropped) {
        assert!(k >= d, "kept {kept:?} dropped {dropped:?}");
    }
}

#[test]
fn row_matching_no_filter_only_shows_in_its_exit_state() {
    let s = schedule(&[1.0], &[1.0], 2, 12, true);
    let dropped = run(false, None, &s);
    assert!(dropped.iter().all(|r| r.num("x") != Some(3.0)));

    let exit = Arc::new(EffectChain::new(vec![Effect::Fade]));
    let kept = run(true, Some(exit), &s);
    let lonely = kept
        .iter()
        .filter(|r| r.num("x") == Some(3.0))
        .collect::<Vec<_>>();
    assert_eq!(lonely.len(), 12);
    assert!(lonely.iter().all(|r| r.num("alpha") == Some(0.0)));
}

#[test]
fn pass_through_rows_repeat_in_every_frame() {
    let s = schedule(&[1.0], &[1.0], 2, 5, true);
    let rows = vec![
        Row::new(PanelId(1), Group::Ungrouped).with("x", 1.0),
        Row::new(PanelId(1), Group::Id(4)).with("x", 2.0),
    ];
    let out = Interpolator::run(
        Partition::PassThrough(rows),
        &s,
        &TweenOptions::default(),
        Geometry::Point,
    )
    .unwrap();
    assert_eq!(counts(&out, 5), vec![2; 5]);
    assert_eq!(out[0].group.to_string(), "-1_1");
    assert_eq!(out[9].group.to_string(), "4_5");
}

#[test]
fn subset_count_must_match_the_schedule() {
    let s = schedule(&[1.0], &[1.0], 2, 5, true);
    let err = Interpolator::run(
        Partition::Subsets(vec![vec![]]),
        &s,
        &TweenOptions::default(),
        Geometry::Point,
    )
    .unwrap_err();
    assert!(matches!(err, FramesError::Validation(_)));
}
