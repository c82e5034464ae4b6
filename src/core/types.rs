//! Value types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// A 3-D point in either the sensor frame or the world frame (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Origin point.
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Componentwise minimum with another point.
    #[inline]
    pub fn min(&self, other: &Point3) -> Point3 {
        Point3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Componentwise maximum with another point.
    #[inline]
    pub fn max(&self, other: &Point3) -> Point3 {
        Point3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

/// One scan message: an ordered set of range readings swept over an
/// angular interval.
#[derive(Debug, Clone)]
pub struct LaserScan {
    /// Acquisition time in seconds.
    pub timestamp: f64,
    /// Frame the readings are expressed in.
    pub frame_id: String,
    /// Bearing of the first sample, radians.
    pub angle_min: f32,
    /// Bearing of the last sample, radians.
    pub angle_max: f32,
    /// Range readings in meters, one per sample.
    pub ranges: Vec<f32>,
}

impl LaserScan {
    /// Create a new scan.
    pub fn new(
        timestamp: f64,
        frame_id: impl Into<String>,
        angle_min: f32,
        angle_max: f32,
        ranges: Vec<f32>,
    ) -> Self {
        Self {
            timestamp,
            frame_id: frame_id.into(),
            angle_min,
            angle_max,
            ranges,
        }
    }

    /// Number of range samples in the scan.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.ranges.len()
    }

    /// Angular step between consecutive samples, or `None` for a
    /// degenerate scan with fewer than 2 samples.
    #[inline]
    pub fn angle_step(&self) -> Option<f32> {
        let n = self.ranges.len();
        if n < 2 {
            return None;
        }
        Some((self.angle_max - self.angle_min) / (n - 1) as f32)
    }
}

/// Per-axis running minimum and maximum over a set of hit points.
///
/// Only ever constructed populated; the empty state lives in
/// `ExtremaAccumulator`, which refuses to produce an `Extrema` before
/// any point has been folded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub min: Point3,
    pub max: Point3,
}

/// Object dimensions and centroid derived from one scan's extrema,
/// expressed in the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    /// Extent along the world x axis, meters.
    pub length: f32,
    /// Extent along the world y axis, meters.
    pub width: f32,
    /// Extent along the world z axis, meters.
    pub height: f32,
    /// Midpoint of the extrema on each axis.
    pub centroid: Point3,
    /// The raw extrema the dimensions were derived from, kept for
    /// diagnostic reporting.
    pub extrema: Extrema,
}

/// Outcome of processing a single scan against a known transform.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// An object was detected above the ground plane.
    Object(DimensionResult),
    /// Every world point fell below the ground-height threshold; the
    /// sensor saw open ground. Expected, not an error.
    NoObject,
}

/// Outcome of one scan during a replay, where the transform itself may
/// be missing for that scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOutcome {
    Object(DimensionResult),
    NoObject,
    /// No transform could be resolved at the scan's timestamp; the scan
    /// was skipped without fabricating or reusing a stale transform.
    TransformUnavailable,
}

/// Per-scan record produced by a replay run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub timestamp: f64,
    pub outcome: ReplayOutcome,
}
