use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TransitionConfig;
use crate::data::dataset::{Dataset, Layer};
use crate::data::row::Row;
use crate::filter::evaluator::assign_filters;
use crate::filter::spec::FilterSet;
use crate::foundation::core::PanelId;
use crate::foundation::error::{FramesError, FramesResult};
use crate::interpolate::interpolator::Interpolator;
use crate::partition::partitioner::RowSetPartitioner;
use crate::schedule::frame_info::FrameInfo;
use crate::schedule::scheduler::FrameSchedule;
use crate::tween::effect::{EffectChain, RowEffect};
use crate::tween::geometry::Geometry;
use crate::tween::transition::TweenOptions;

/// Threading controls for render units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderThreading {
    /// Render units on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl RenderThreading {
    /// Reject `threads == 0`.
    pub fn validate(&self) -> FramesResult<()> {
        if self.threads == Some(0) {
            return Err(FramesError::config(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Worker pool for parallel rendering, sized by `threads` when set.
    fn pool(&self) -> FramesResult<rayon::ThreadPool> {
        self.validate()?;
        let builder = match self.threads {
            Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n),
            None => rayon::ThreadPoolBuilder::new(),
        };
        builder
            .build()
            .map_err(|e| FramesError::Other(anyhow::anyhow!("render pool unavailable: {e}")))
    }
}

/// Frame-expanded dataset plus the per-frame labels.
#[derive(Clone, Debug, Serialize)]
pub struct Expansion {
    /// One record per output frame.
    pub frames: Vec<FrameInfo>,
    /// Expanded layers; every row's group is frame-scoped.
    pub layers: Vec<Layer>,
}

/// Prepared filter transition: validated filters, a shared schedule and tween options.
///
/// Setup tags rows with their filter membership; rendering expands every (layer, panel) unit
/// independently.
#[derive(Clone, Debug)]
pub struct TransitionFilter {
    filters: FilterSet,
    schedule: Arc<FrameSchedule>,
    keep: bool,
    tween: TweenOptions,
    threading: RenderThreading,
}

struct Unit {
    layer: usize,
    panel: PanelId,
    geometry: Geometry,
    rows: Vec<Row>,
}

impl TransitionFilter {
    /// Pair `filters` with a schedule built for them.
    pub fn new(filters: FilterSet, schedule: FrameSchedule) -> FramesResult<Self> {
        if schedule.filter_count() != filters.len() {
            return Err(FramesError::config(format!(
                "schedule covers {} filters but {} were given",
                schedule.filter_count(),
                filters.len()
            )));
        }
        Ok(Self {
            filters,
            schedule: Arc::new(schedule),
            keep: false,
            tween: TweenOptions::default(),
            threading: RenderThreading::default(),
        })
    }

    /// Keep rows outside the active filter in their exit state.
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Replace the easing and enter/exit effects.
    pub fn with_tween(mut self, tween: TweenOptions) -> Self {
        self.tween = tween;
        self
    }

    /// Replace the threading controls.
    pub fn with_threading(mut self, threading: RenderThreading) -> Self {
        self.threading = threading;
        self
    }

    /// Validate `cfg` and prepare the transition it describes.
    #[tracing::instrument(skip_all, fields(filters = cfg.filters.len(), nframes = cfg.nframes))]
    pub fn from_config(cfg: &TransitionConfig) -> FramesResult<Self> {
        cfg.threading.validate()?;
        let filters = cfg.filter_set()?;
        let schedule = cfg.schedule(&filters)?;
        let effect = |chain: &EffectChain| {
            (!chain.is_empty()).then(|| Arc::new(chain.clone()) as Arc<dyn RowEffect>)
        };
        let tween = TweenOptions {
            ease: cfg.ease,
            enter: effect(&cfg.enter),
            exit: effect(&cfg.exit),
        };
        Ok(Self::new(filters, schedule)?
            .with_keep(cfg.keep)
            .with_tween(tween)
            .with_threading(cfg.threading.clone()))
    }

    /// Filters in transition order.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Shared frame schedule.
    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }

    /// Authoritative number of output frames.
    pub fn nframes(&self) -> u64 {
        self.schedule.nframes()
    }

    /// Tag the rows of every filtered layer with their filter membership.
    #[tracing::instrument(skip_all, fields(layers = dataset.layers.len()))]
    pub fn setup(&self, dataset: &mut Dataset) -> FramesResult<()> {
        for layer in dataset.layers.iter_mut().filter(|l| l.filter) {
            let membership = assign_filters(&mut layer.rows, &self.filters)?;
            tracing::debug!(
                layer = %layer.name,
                panels = membership.panels.len(),
                fast_path = membership.panels.values().filter(|m| m.is_all()).count(),
                "layer tagged"
            );
        }
        Ok(())
    }

    /// Expand a tagged dataset into frame-scoped rows.
    #[tracing::instrument(
        skip_all,
        fields(rows = dataset.row_count(), parallel = self.threading.parallel)
    )]
    pub fn render(&self, dataset: Dataset) -> FramesResult<Expansion> {
        let mut layers = Vec::with_capacity(dataset.layers.len());
        let mut units = Vec::new();
        for (index, mut layer) in dataset.layers.into_iter().enumerate() {
            let rows = std::mem::take(&mut layer.rows);
            units.extend(split_units(index, layer.geometry, layer.filter, rows));
            layers.push(layer);
        }

        let rendered = if self.threading.parallel {
            let pool = self.threading.pool()?;
            pool.install(|| {
                units
                    .into_par_iter()
                    .map(|unit| self.render_unit(unit))
                    .collect::<Vec<_>>()
            })
        } else {
            units
                .into_iter()
                .map(|unit| self.render_unit(unit))
                .collect::<Vec<_>>()
        };

        for item in rendered {
            let (layer, rows) = item?;
            layers[layer].rows.extend(rows);
        }
        Ok(Expansion {
            frames: self.schedule.frame_info.clone(),
            layers,
        })
    }

    /// [`setup`](Self::setup) followed by [`render`](Self::render).
    pub fn expand(&self, mut dataset: Dataset) -> FramesResult<Expansion> {
        self.setup(&mut dataset)?;
        self.render(dataset)
    }

    fn render_unit(&self, unit: Unit) -> FramesResult<(usize, Vec<Row>)> {
        let input = unit.rows.len();
        let partition = RowSetPartitioner::partition(
            unit.rows,
            self.filters.len(),
            unit.geometry,
            self.keep,
            self.tween.exit.as_deref(),
        );
        let pass_through = partition.is_pass_through();
        let rows = Interpolator::run(partition, &self.schedule, &self.tween, unit.geometry)?;
        tracing::debug!(
            layer = unit.layer,
            panel = %unit.panel,
            input,
            output = rows.len(),
            pass_through,
            "unit rendered"
        );
        Ok((unit.layer, rows))
    }
}

fn split_units(layer: usize, geometry: Geometry, filtered: bool, rows: Vec<Row>) -> Vec<Unit> {
    let mut panels: BTreeMap<PanelId, Vec<Row>> = BTreeMap::new();
    for mut row in rows {
        if !filtered {
            row.membership = None;
        }
        panels.entry(row.panel).or_default().push(row);
    }
    panels
        .into_iter()
        .map(|(panel, rows)| Unit {
            layer,
            panel,
            geometry,
            rows,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/transition.rs"]
mod tests;
