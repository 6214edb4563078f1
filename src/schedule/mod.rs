/// Apportioning relative lengths into integer frame counts.
pub mod distribute;
/// Per-frame label tracks.
pub mod frame_info;
/// The frame scheduler service.
pub mod scheduler;
