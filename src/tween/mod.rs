/// Easing curves.
pub mod ease;
/// Enter/exit effects.
pub mod effect;
/// Geometry dispatch and per-geometry tween services.
pub mod geometry;
/// Interpolation of values, shapes and rows.
pub mod lerp;
/// Frame-by-frame tweening between two states.
pub mod transition;
