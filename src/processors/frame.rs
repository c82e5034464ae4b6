//! Batch application of a rigid transform to scan points.

use crate::core::transforms::RigidTransform;
use crate::core::types::Point3;

/// Map sensor-frame points into the world frame.
///
/// Pure function: the output has the same order and count as the input,
/// each point rotated then translated by `transform`.
pub fn to_world(transform: &RigidTransform, points: &[Point3]) -> Vec<Point3> {
    points.iter().map(|&p| transform.apply(p)).collect()
}

/// Map world-frame points back into the sensor frame.
///
/// The forward pipeline never needs this; it exists for diagnostics and for
/// checking the round-trip property in tests.
pub fn to_sensor(transform: &RigidTransform, points: &[Point3]) -> Vec<Point3> {
    let inverse = transform.inverse();
    points.iter().map(|&p| inverse.apply(p)).collect()
}
