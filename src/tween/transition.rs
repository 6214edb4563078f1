use std::collections::HashMap;
use std::sync::Arc;

use crate::data::row::Row;
use crate::foundation::error::FramesResult;
use crate::tween::ease::Ease;
use crate::tween::effect::RowEffect;
use crate::tween::geometry::{TrackKey, Tween};

/// Easing and enter/exit effects shared by every transition.
#[derive(Clone, Debug, Default)]
pub struct TweenOptions {
    /// Easing applied to transition progress.
    pub ease: Ease,
    /// Start state of entering rows.
    pub enter: Option<Arc<dyn RowEffect>>,
    /// End state of exiting rows.
    pub exit: Option<Arc<dyn RowEffect>>,
}

impl TweenOptions {
    /// Options with `ease` and no enter/exit effects.
    pub fn eased(ease: Ease) -> Self {
        Self {
            ease,
            ..Self::default()
        }
    }
}

enum Plan {
    Matched(Vec<Row>, Vec<Row>),
    Entering(Option<(Vec<Row>, Vec<Row>)>),
    Exiting(Option<(Vec<Row>, Vec<Row>)>),
}

/// Tween from `from` to `to` over `frames` frames.
///
/// Frame `j` uses eased progress `j / frames`, so the last frame is exactly `to`. Rows
/// only in `to` start from the enter effect and rows only in `from` end at the exit effect;
/// without an effect they pop in on the last frame or vanish immediately.
pub fn tween_frames(
    tween: &dyn Tween,
    from: &[Row],
    to: &[Row],
    frames: u64,
    opts: &TweenOptions,
) -> FramesResult<Vec<Vec<Row>>> {
    if frames == 0 {
        return Ok(Vec::new());
    }
    let source = tween.key(from)?;
    let target = tween.key(to)?;
    let mut by_key: HashMap<&TrackKey, usize> = HashMap::with_capacity(source.len());
    for (i, track) in source.iter().enumerate() {
        by_key.insert(&track.key, i);
    }

    let mut matched = vec![false; source.len()];
    let mut plans = Vec::with_capacity(source.len().max(target.len()));
    for track in &target {
        match by_key.get(&track.key) {
            Some(&i) => {
                matched[i] = true;
                let (a, b) = tween.align(&source[i].rows, &track.rows);
                plans.push(Plan::Matched(a, b));
            }
            None => {
                let start = tween.enter(&track.rows, opts.enter.as_deref());
                plans.push(Plan::Entering(
                    start.map(|start| tween.align(&start, &track.rows)),
                ));
            }
        }
    }
    for (track, _) in source.iter().zip(&matched).filter(|(_, m)| !**m) {
        let end = tween.exit(&track.rows, opts.exit.as_deref());
        plans.push(Plan::Exiting(
            end.map(|end| tween.align(&track.rows, &end)),
        ));
    }

    let mut out = Vec::with_capacity(frames as usize);
    for j in 1..frames {
        let t = opts.ease.apply(j as f64 / frames as f64);
        let mut frame = Vec::with_capacity(to.len());
        for plan in &plans {
            match plan {
                Plan::Matched(a, b)
                | Plan::Entering(Some((a, b)))
                | Plan::Exiting(Some((a, b))) => frame.extend(tween.interpolate(a, b, t)),
                Plan::Entering(None) | Plan::Exiting(None) => {}
            }
        }
        out.push(frame);
    }
    out.push(to.to_vec());
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/tween/transition.rs"]
mod tests;
