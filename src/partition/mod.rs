/// Per-filter row subsets with the keep policy applied.
pub mod partitioner;
