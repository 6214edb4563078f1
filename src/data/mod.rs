/// Layers and datasets as read from JSON.
pub mod dataset;
/// Per-row filter membership and its textual codec.
pub mod membership;
/// Rows, shapes and column batches.
pub mod row;
/// Cell values.
pub mod value;
