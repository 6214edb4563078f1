use crate::data::row::Row;
use crate::foundation::error::{FramesError, FramesResult};
use crate::partition::partitioner::Partition;
use crate::schedule::scheduler::FrameSchedule;
use crate::tween::geometry::Geometry;
use crate::tween::transition::{TweenOptions, tween_frames};

/// Walks the filter sequence and stitches hold and transition frames together.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interpolator;

impl Interpolator {
    /// Expand one render unit into frame-scoped rows.
    ///
    /// Every output row's group becomes `Framed { base, frame }` with a 1-based frame in
    /// `1..=schedule.nframes()`.
    #[tracing::instrument(skip(partition, schedule, opts), fields(nframes = schedule.nframes()))]
    pub fn run(
        partition: Partition,
        schedule: &FrameSchedule,
        opts: &TweenOptions,
        geometry: Geometry,
    ) -> FramesResult<Vec<Row>> {
        let nframes = schedule.nframes();
        let subsets = match partition {
            Partition::PassThrough(rows) => {
                let frames = (0..nframes).map(|_| rows.clone()).collect();
                return Ok(stamp(frames));
            }
            Partition::Subsets(subsets) => subsets,
        };
        let k = schedule.filter_count();
        if subsets.len() != k {
            return Err(FramesError::validation(format!(
                "partition has {} subsets but the schedule covers {k} filters",
                subsets.len()
            )));
        }

        let tween = geometry.tween();
        let mut frames: Vec<Vec<Row>> = Vec::with_capacity(nframes as usize + 1);
        let mut current = subsets[0].clone();
        for i in 0..k {
            for _ in 0..schedule.state_lengths[i] {
                frames.push(current.clone());
            }

            let len = schedule.transition_lengths[i];
            let target = match (i + 1 < k, schedule.wrap) {
                (true, _) => &subsets[i + 1],
                (false, true) => &subsets[0],
                (false, false) => continue,
            };
            if len == 0 {
                continue;
            }
            frames.extend(tween_frames(tween, &current, target, len, opts)?);
            current = target.clone();
        }

        // The closing seam frame of a wrapped schedule repeats frame 1.
        frames.truncate(nframes as usize);
        let out = stamp(frames);
        tracing::debug!(rows = out.len(), "unit interpolated");
        Ok(out)
    }
}

fn stamp(frames: Vec<Vec<Row>>) -> Vec<Row> {
    frames
        .into_iter()
        .zip(1u64..)
        .flat_map(|(rows, frame)| {
            rows.into_iter().map(move |mut row| {
                row.group = std::mem::take(&mut row.group).framed(frame);
                row
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/interpolate/interpolator.rs"]
mod tests;
