/// The hold/transition state machine.
pub mod interpolator;
