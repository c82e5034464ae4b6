//! Polar-to-Cartesian conversion of one scan's range readings.

use crate::core::types::{LaserScan, Point3};

/// Convert a scan's range readings to 3-D points in the sensor frame.
///
/// Sample `i`'s bearing is `angle_min + i * step` where `step` is
/// `(angle_max - angle_min) / (n - 1)`. All pings lie in the sensor's x-y
/// plane, so every output point has z = 0. Readings at or beyond
/// `max_valid_range` (and non-finite readings) are discarded: at long range
/// the beam is near-parallel to the ground plane or returned nothing.
///
/// A degenerate scan with fewer than 2 samples produces an empty sequence,
/// not an error.
///
/// # Arguments
///
/// * `scan` - The scan message to convert
/// * `max_valid_range` - Discard threshold in meters
///
/// # Returns
///
/// Sensor-frame points in sample order, one per retained reading.
pub fn scan_to_local_points(scan: &LaserScan, max_valid_range: f32) -> Vec<Point3> {
    let step = match scan.angle_step() {
        Some(step) => step,
        None => return Vec::new(),
    };

    let mut points = Vec::with_capacity(scan.ranges.len());

    for (i, &range) in scan.ranges.iter().enumerate() {
        if !range.is_finite() || range >= max_valid_range {
            continue;
        }
        let bearing = scan.angle_min + i as f32 * step;
        let (sin_b, cos_b) = bearing.sin_cos();
        points.push(Point3::new(range * cos_b, range * sin_b, 0.0));
    }

    points
}
