//! Per-scan pipeline stages.

pub mod dimensions;
pub mod extrema;
pub mod frame;
pub mod ground;
pub mod pipeline;
pub mod polar;

// Re-export key types for convenience
pub use extrema::{ExtremaAccumulator, ExtremaError};
pub use ground::{split_at_ground, GroundPartition};
pub use pipeline::{replay, replay_files, ScanProcessor};
pub use polar::scan_to_local_points;
