use std::collections::BTreeMap;

use serde::Serialize;

/// Label state of one track at one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameLabels {
    /// `true` while tweening between two states.
    pub transitioning: bool,
    /// State the frame comes from.
    pub previous: String,
    /// State nearest to the frame.
    pub closest: String,
    /// State the frame heads to.
    pub next: String,
}

impl FrameLabels {
    fn hold(level: &str) -> Self {
        Self {
            transitioning: false,
            previous: level.to_owned(),
            closest: level.to_owned(),
            next: level.to_owned(),
        }
    }
}

/// Expand per-state segments into one label record per frame.
///
/// Segments run static 1, transition 1 to 2, static 2, ..., with the last transition
/// heading back to the first state. Only the first `nframes` records are kept, which drops
/// the closing seam frame of a wrapped schedule.
pub fn frame_labels(
    levels: &[String],
    static_lengths: &[u64],
    transition_lengths: &[u64],
    nframes: u64,
) -> Vec<FrameLabels> {
    let k = levels.len();
    let mut out = Vec::with_capacity(nframes.min(1 << 16) as usize);
    for i in 0..k {
        let level = &levels[i];
        let next = &levels[(i + 1) % k];
        for _ in 0..static_lengths.get(i).copied().unwrap_or(0) {
            out.push(FrameLabels::hold(level));
        }
        let len = transition_lengths.get(i).copied().unwrap_or(0);
        for j in 1..=len {
            let progress = j as f64 / len as f64;
            out.push(FrameLabels {
                transitioning: true,
                previous: level.clone(),
                closest: if progress < 0.5 { level } else { next }.clone(),
                next: next.clone(),
            });
        }
    }
    out.truncate(nframes as usize);
    out
}

/// Per-frame metadata exposed to label templates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameInfo {
    /// 1-based frame number.
    pub frame: u64,
    /// Authoritative frame count.
    pub nframes: u64,
    /// `frame / nframes`.
    pub progress: f64,
    /// Labels over filter names.
    pub name: FrameLabels,
    /// Labels over filter expression text.
    pub expression: FrameLabels,
}

impl FrameInfo {
    /// `true` while tweening between two filters.
    pub fn transitioning(&self) -> bool {
        self.name.transitioning
    }

    /// Flat variable map: `frame`, `nframes`, `progress`, `transitioning`,
    /// `{previous,closest,next}_filter` and `{previous,closest,next}_filter_expression`.
    pub fn variables(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("frame", self.frame.to_string()),
            ("nframes", self.nframes.to_string()),
            ("progress", self.progress.to_string()),
            ("transitioning", self.name.transitioning.to_string()),
            ("previous_filter", self.name.previous.clone()),
            ("closest_filter", self.name.closest.clone()),
            ("next_filter", self.name.next.clone()),
            (
                "previous_filter_expression",
                self.expression.previous.clone(),
            ),
            ("closest_filter_expression", self.expression.closest.clone()),
            ("next_filter_expression", self.expression.next.clone()),
        ])
    }

    /// Substitute `{variable}` placeholders. Unknown placeholders are left as written.
    pub fn render_label(&self, template: &str) -> String {
        let vars = self.variables();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = after[..close].trim();
                    match vars.get(key) {
                        Some(v) => out.push_str(v),
                        None => out.push_str(&rest[open..open + close + 2]),
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Zip the name and expression tracks into frame records.
pub(crate) fn zip_tracks(
    names: Vec<FrameLabels>,
    expressions: Vec<FrameLabels>,
) -> Vec<FrameInfo> {
    let nframes = names.len().min(expressions.len()) as u64;
    names
        .into_iter()
        .zip(expressions)
        .enumerate()
        .map(|(i, (name, expression))| {
            let frame = i as u64 + 1;
            FrameInfo {
                frame,
                nframes,
                progress: frame as f64 / nframes as f64,
                name,
                expression,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame_info.rs"]
mod tests;
