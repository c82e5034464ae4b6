//! Ground-plane filtering of world-frame points.

use crate::core::types::Point3;

/// World points split into ground returns and object hits.
#[derive(Debug, Clone, Default)]
pub struct GroundPartition {
    /// Points below the height threshold (ground-plane returns).
    pub ground: Vec<Point3>,
    /// Points at or above the height threshold (object hits).
    pub hits: Vec<Point3>,
}

impl GroundPartition {
    /// Total number of points across both sets.
    pub fn total(&self) -> usize {
        self.ground.len() + self.hits.len()
    }
}

/// Partition world-frame points by height above the ground plane.
///
/// Points with z below `height_threshold` are ground returns; points at or
/// above it belong to the object of interest. Every input point lands in
/// exactly one of the two output sequences.
pub fn split_at_ground(points: &[Point3], height_threshold: f32) -> GroundPartition {
    let mut partition = GroundPartition::default();

    for &p in points {
        if p.z < height_threshold {
            partition.ground.push(p);
        } else {
            partition.hits.push(p);
        }
    }

    partition
}
