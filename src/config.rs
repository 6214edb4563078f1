use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::spec::{FilterSet, FilterSpec};
use crate::foundation::error::{FramesError, FramesResult};
use crate::pipeline::transition::RenderThreading;
use crate::schedule::scheduler::{FrameSchedule, FrameScheduler};
use crate::tween::ease::Ease;
use crate::tween::effect::EffectChain;

/// One filter entry of a [`TransitionConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Display name; defaults to the expression text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Predicate expression.
    pub expr: String,
}

/// JSON-facing description of a filter transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    /// Filters in transition order (at least 2).
    pub filters: Vec<FilterConfig>,
    /// Relative transition lengths, recycled to the filter count.
    #[serde(default = "one")]
    pub transition_length: Vec<f64>,
    /// Relative hold lengths, recycled to the filter count.
    #[serde(default = "one")]
    pub filter_length: Vec<f64>,
    /// Requested frame count.
    #[serde(default = "default_nframes")]
    pub nframes: u64,
    /// Transition from the last filter back to the first.
    #[serde(default = "yes")]
    pub wrap: bool,
    /// Keep rows outside the active filter in their exit state.
    #[serde(default)]
    pub keep: bool,
    /// Easing of transition progress.
    #[serde(default)]
    pub ease: Ease,
    /// Enter effects.
    #[serde(default)]
    pub enter: EffectChain,
    /// Exit effects.
    #[serde(default)]
    pub exit: EffectChain,
    /// Render-unit threading.
    #[serde(default)]
    pub threading: RenderThreading,
}

fn one() -> Vec<f64> {
    vec![1.0]
}

fn default_nframes() -> u64 {
    100
}

fn yes() -> bool {
    true
}

impl TransitionConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramesResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramesError::serde(format!("parse transition config JSON: {e}")))
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> FramesResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FramesError::serde(format!("parse transition config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramesError::config(format!("open transition config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every setup-time error without keeping the results.
    pub fn validate(&self) -> FramesResult<()> {
        let filters = self.filter_set()?;
        self.schedule(&filters)?;
        self.threading.validate()
    }

    /// Parse the filters into a validated [`FilterSet`].
    pub fn filter_set(&self) -> FramesResult<FilterSet> {
        let specs = self
            .filters
            .iter()
            .map(|f| FilterSpec::parse(f.name.as_deref(), &f.expr))
            .collect::<FramesResult<Vec<_>>>()?;
        FilterSet::new(specs)
    }

    /// Distribute the frame budget over `filters`.
    pub fn schedule(&self, filters: &FilterSet) -> FramesResult<FrameSchedule> {
        FrameScheduler::distribute(
            &self.filter_length,
            &self.transition_length,
            self.nframes,
            self.wrap,
            &filters.names(),
            &filters.expressions(),
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
