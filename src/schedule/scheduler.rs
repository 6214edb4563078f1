use crate::foundation::error::{FramesError, FramesResult};
use crate::schedule::distribute::distribute_frames;
use crate::schedule::frame_info::{FrameInfo, frame_labels, zip_tracks};

/// Concrete frame budget of a filter sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSchedule {
    /// Hold frames per filter.
    pub state_lengths: Vec<u64>,
    /// Transition frames out of each filter. The last entry is the closing transition and is
    /// 0 when `wrap` is off.
    pub transition_lengths: Vec<u64>,
    /// Whether the last filter transitions back into the first.
    pub wrap: bool,
    /// One record per output frame.
    pub frame_info: Vec<FrameInfo>,
}

impl FrameSchedule {
    /// Authoritative number of output frames.
    pub fn nframes(&self) -> u64 {
        self.frame_info.len() as u64
    }

    /// Number of filters the schedule was built for.
    pub fn filter_count(&self) -> usize {
        self.state_lengths.len()
    }
}

/// Turns relative lengths and a frame budget into a [`FrameSchedule`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameScheduler;

impl FrameScheduler {
    /// Build the schedule for the filters named `names` (with display text `exprs`).
    ///
    /// `state` and `transition` are relative lengths, recycled to the filter count. The
    /// integer lengths sum to `total_frames`, plus one seam frame when `wrap` is set.
    #[tracing::instrument(skip(state, transition, names, exprs), fields(filters = names.len()))]
    pub fn distribute(
        state: &[f64],
        transition: &[f64],
        total_frames: u64,
        wrap: bool,
        names: &[String],
        exprs: &[String],
    ) -> FramesResult<FrameSchedule> {
        let k = names.len();
        if k < 2 {
            return Err(FramesError::config(format!(
                "at least 2 filters are required, got {k}"
            )));
        }
        if exprs.len() != k {
            return Err(FramesError::config(format!(
                "{k} filter names but {} filter expressions",
                exprs.len()
            )));
        }
        if total_frames == 0 {
            return Err(FramesError::config("nframes must be >= 1"));
        }

        let statics = recycle(state, k, "filter_length")?;
        let mut transitions = recycle(transition, k, "transition_length")?;
        if !wrap && let Some(last) = transitions.last_mut() {
            *last = 0.0;
        }

        let counts = distribute_frames(&statics, &transitions, total_frames + u64::from(wrap))?;
        let name_track = frame_labels(
            names,
            &counts.static_lengths,
            &counts.transition_lengths,
            total_frames,
        );
        let expr_track = frame_labels(
            exprs,
            &counts.static_lengths,
            &counts.transition_lengths,
            total_frames,
        );

        let schedule = FrameSchedule {
            state_lengths: counts.static_lengths,
            transition_lengths: counts.transition_lengths,
            wrap,
            frame_info: zip_tracks(name_track, expr_track),
        };
        tracing::debug!(
            nframes = schedule.nframes(),
            state = ?schedule.state_lengths,
            transition = ?schedule.transition_lengths,
            "schedule distributed"
        );
        Ok(schedule)
    }
}

fn recycle(values: &[f64], k: usize, what: &str) -> FramesResult<Vec<f64>> {
    if values.is_empty() {
        return Err(FramesError::config(format!("{what} must not be empty")));
    }
    Ok(values.iter().copied().cycle().take(k).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
