use crate::foundation::error::{FramesError, FramesResult};

/// Integer frame counts per filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCounts {
    /// Hold frames per filter.
    pub static_lengths: Vec<u64>,
    /// Transition frames out of each filter.
    pub transition_lengths: Vec<u64>,
}

impl FrameCounts {
    /// Total frames across all segments.
    pub fn total(&self) -> u64 {
        self.static_lengths.iter().sum::<u64>() + self.transition_lengths.iter().sum::<u64>()
    }
}

/// Apportion `frames` across relative static and transition lengths.
///
/// Every length is scaled by `frames / total` and floored; the frames lost to flooring go
/// to the largest remainders (ties resolve by position, statics before transitions). The
/// result always sums to exactly `frames`.
pub fn distribute_frames(
    statics: &[f64],
    transitions: &[f64],
    frames: u64,
) -> FramesResult<FrameCounts> {
    if statics.len() != transitions.len() {
        return Err(FramesError::config(format!(
            "static and transition lengths differ in size ({} vs {})",
            statics.len(),
            transitions.len()
        )));
    }
    if let Some(bad) = statics
        .iter()
        .chain(transitions)
        .find(|v| !v.is_finite() || **v < 0.0)
    {
        return Err(FramesError::config(format!(
            "lengths must be finite and >= 0, got {bad}"
        )));
    }
    let total: f64 = statics.iter().chain(transitions).sum();
    if total <= 0.0 {
        return Err(FramesError::config("sum of lengths must be > 0"));
    }

    let exact = statics
        .iter()
        .chain(transitions)
        .map(|v| v * frames as f64 / total)
        .collect::<Vec<_>>();
    let mut counts = exact.iter().map(|v| v.floor() as u64).collect::<Vec<_>>();

    let assigned: u64 = counts.iter().sum();
    let missing = frames.saturating_sub(assigned) as usize;
    if missing > 0 {
        let mut order = (0..exact.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.total_cmp(&ra).then(a.cmp(&b))
        });
        for &i in order.iter().cycle().take(missing) {
            counts[i] += 1;
        }
    }

    let transition_lengths = counts.split_off(statics.len());
    Ok(FrameCounts {
        static_lengths: counts,
        transition_lengths,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/distribute.rs"]
mod tests;
