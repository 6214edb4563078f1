//! filterframes expands a dataset into animation frames driven by a sequence of row filters.
//!
//! Each filter is one animation state. The crate:
//!
//! - Evaluates every filter per panel and tags rows with their membership
//!   ([`FilterEvaluator`], [`assign_filters`])
//! - Turns relative hold/transition lengths into a concrete [`FrameSchedule`]
//! - Splits each render unit into per-filter subsets ([`RowSetPartitioner`])
//! - Holds and tweens between subsets frame by frame ([`Interpolator`])
//!
//! [`TransitionFilter`] drives all four over a [`Dataset`], optionally on a rayon pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod expression;

/// JSON transition configuration.
pub mod config;
/// Rows, values, membership tags and datasets.
pub mod data;
/// Filters and their per-panel evaluation.
pub mod filter;
/// Hold/transition frame expansion.
pub mod interpolate;
/// Splitting render units into per-filter subsets.
pub mod partition;
/// Setup/render driver over whole datasets.
pub mod pipeline;
/// Frame budgets and per-frame labels.
pub mod schedule;
/// Easing, effects and geometry-aware tweening.
pub mod tween;

pub use crate::foundation::color::Rgba;
pub use crate::foundation::core::{Group, PanelId, Point};
pub use crate::foundation::error::{FramesError, FramesResult};

pub use crate::config::{FilterConfig, TransitionConfig};
pub use crate::data::dataset::{Dataset, Layer};
pub use crate::data::membership::{FilterBits, MembershipTag};
pub use crate::data::row::{Row, RowBatch, Shape};
pub use crate::data::value::Value;
pub use crate::filter::evaluator::{
    FilterEvaluator, LayerMembership, PanelMembership, assign_filters,
};
pub use crate::filter::predicate::{ExprPredicate, FnPredicate, Predicate};
pub use crate::filter::spec::{FilterSet, FilterSpec};
pub use crate::interpolate::interpolator::Interpolator;
pub use crate::partition::partitioner::{Partition, RowSetPartitioner};
pub use crate::pipeline::transition::{Expansion, RenderThreading, TransitionFilter};
pub use crate::schedule::distribute::{FrameCounts, distribute_frames};
pub use crate::schedule::frame_info::{FrameInfo, FrameLabels};
pub use crate::schedule::scheduler::{FrameSchedule, FrameScheduler};
pub use crate::tween::ease::Ease;
pub use crate::tween::effect::{Effect, EffectChain, RowEffect};
pub use crate::tween::geometry::{Geometry, Tween};
pub use crate::tween::transition::TweenOptions;
