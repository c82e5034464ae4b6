//! Object dimensions and centroid from accumulated extrema.

use crate::core::types::{DimensionResult, Extrema, Point3};

/// Derive length, width, height, and centroid from populated extrema.
///
/// Extent per axis is `max - min`, which is non-negative by the
/// accumulator's invariant and correct regardless of where the object sits
/// relative to the world origin. The centroid is the per-axis midpoint of
/// the extrema.
pub fn estimate(extrema: &Extrema) -> DimensionResult {
    let min = extrema.min;
    let max = extrema.max;

    DimensionResult {
        length: max.x - min.x,
        width: max.y - min.y,
        height: max.z - min.z,
        centroid: Point3::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        ),
        extrema: *extrema,
    }
}
