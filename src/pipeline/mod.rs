/// Setup and render driver for a whole dataset.
pub mod transition;
