//! Rigid transforms between the sensor frame and the world frame.
//!
//! A `RigidTransform` maps sensor-frame points to world-frame points by
//! rotating then translating. One transform is applied to every point of a
//! scan; this is the documented single-transform-per-scan approximation,
//! adequate while the platform moves slowly relative to one sweep.

use nalgebra::{Isometry3, Point3 as NaPoint3, Quaternion, Translation3, UnitQuaternion, Vector3};

use super::types::Point3;

/// A rotation + translation mapping sensor-frame points into the world
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    iso: Isometry3<f32>,
}

impl RigidTransform {
    /// The identity transform (sensor frame coincides with world frame).
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    /// Pure translation, no rotation.
    pub fn from_translation(t: [f32; 3]) -> Self {
        Self {
            iso: Isometry3::translation(t[0], t[1], t[2]),
        }
    }

    /// Build from a translation and a rotation.
    pub fn from_translation_rotation(t: [f32; 3], rotation: UnitQuaternion<f32>) -> Self {
        Self {
            iso: Isometry3::from_parts(Translation3::new(t[0], t[1], t[2]), rotation),
        }
    }

    /// Build from a translation and an `(x, y, z, w)` quaternion as recorded
    /// in transform tracks. The quaternion is normalized on construction.
    pub fn from_translation_quaternion(t: [f32; 3], q_xyzw: [f32; 4]) -> Self {
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(
            q_xyzw[3], q_xyzw[0], q_xyzw[1], q_xyzw[2],
        ));
        Self::from_translation_rotation(t, rotation)
    }

    /// Rotation about an axis by an angle in radians, then translation.
    pub fn from_axis_angle(t: [f32; 3], axis: Vector3<f32>, angle: f32) -> Self {
        let rotation = UnitQuaternion::from_scaled_axis(axis.normalize() * angle);
        Self::from_translation_rotation(t, rotation)
    }

    /// Map one point from the sensor frame to the world frame
    /// (rotate, then translate).
    #[inline]
    pub fn apply(&self, p: Point3) -> Point3 {
        let mapped = self.iso.transform_point(&NaPoint3::new(p.x, p.y, p.z));
        Point3::new(mapped.x, mapped.y, mapped.z)
    }

    /// The inverse transform (world frame back to sensor frame).
    pub fn inverse(&self) -> Self {
        Self {
            iso: self.iso.inverse(),
        }
    }

    /// Translation component.
    pub fn translation(&self) -> [f32; 3] {
        let t = self.iso.translation.vector;
        [t.x, t.y, t.z]
    }
}

/// Collaborator that resolves the sensor-to-world transform for a scan.
///
/// Returning `None` means no transform is available at or near the
/// requested timestamp; callers must skip the scan rather than reuse a
/// stale transform.
pub trait TransformSource: Send + Sync {
    fn lookup(&self, sensor_frame: &str, timestamp: f64) -> Option<RigidTransform>;
}

/// One recorded transform sample.
#[derive(Debug, Clone)]
pub struct TrackEntry {
    pub timestamp: f64,
    pub frame_id: String,
    pub transform: RigidTransform,
}

/// A recorded track of timestamped transforms, answering lookups with the
/// nearest-in-time sample within a tolerance.
#[derive(Debug, Clone)]
pub struct TransformTrack {
    entries: Vec<TrackEntry>,
    time_tolerance_s: f64,
}

impl TransformTrack {
    /// Build a track from recorded entries. Entries are sorted by timestamp.
    pub fn new(mut entries: Vec<TrackEntry>, time_tolerance_s: f64) -> Self {
        entries.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self {
            entries,
            time_tolerance_s,
        }
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the track has no samples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TransformSource for TransformTrack {
    fn lookup(&self, sensor_frame: &str, timestamp: f64) -> Option<RigidTransform> {
        let mut best: Option<&TrackEntry> = None;
        let mut best_dt = f64::INFINITY;

        for entry in &self.entries {
            if entry.frame_id != sensor_frame {
                continue;
            }
            let dt = (entry.timestamp - timestamp).abs();
            if dt < best_dt {
                best_dt = dt;
                best = Some(entry);
            }
        }

        match best {
            Some(entry) if best_dt <= self.time_tolerance_s => Some(entry.transform),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_apply() {
        let t = RigidTransform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(t.apply(p), p);
    }

    #[test]
    fn test_translation_only() {
        let t = RigidTransform::from_translation([1.0, -2.0, 0.5]);
        let p = t.apply(Point3::new(0.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y + 2.0).abs() < 1e-6);
        assert!((p.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_then_translate_order() {
        // 90 deg about z maps (1,0,0) to (0,1,0); translation applies after.
        let t = RigidTransform::from_axis_angle([1.0, 0.0, 0.0], Vector3::z(), FRAC_PI_2);
        let p = t.apply(Point3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = RigidTransform::from_axis_angle([0.3, -1.2, 2.5], Vector3::new(1.0, 1.0, 0.5), 0.7);
        let p = Point3::new(1.5, -0.25, 0.75);

        let back = t.inverse().apply(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-5);
        assert!((back.y - p.y).abs() < 1e-5);
        assert!((back.z - p.z).abs() < 1e-5);
    }

    #[test]
    fn test_quaternion_normalized_on_construction() {
        // Unnormalized quaternion (2x identity) must behave as identity.
        let t = RigidTransform::from_translation_quaternion([0.0; 3], [0.0, 0.0, 0.0, 2.0]);
        let p = t.apply(Point3::new(1.0, 2.0, 3.0));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((p.z - 3.0).abs() < 1e-6);
    }

    fn track_entry(timestamp: f64, frame: &str, tx: f32) -> TrackEntry {
        TrackEntry {
            timestamp,
            frame_id: frame.to_string(),
            transform: RigidTransform::from_translation([tx, 0.0, 0.0]),
        }
    }

    #[test]
    fn test_track_lookup_nearest() {
        let track = TransformTrack::new(
            vec![
                track_entry(0.0, "lidar_link", 1.0),
                track_entry(1.0, "lidar_link", 2.0),
                track_entry(2.0, "lidar_link", 3.0),
            ],
            0.5,
        );

        let t = track.lookup("lidar_link", 1.1).unwrap();
        assert_eq!(t.translation()[0], 2.0);
    }

    #[test]
    fn test_track_lookup_outside_tolerance() {
        let track = TransformTrack::new(vec![track_entry(0.0, "lidar_link", 1.0)], 0.5);
        assert!(track.lookup("lidar_link", 10.0).is_none());
    }

    #[test]
    fn test_track_lookup_wrong_frame() {
        let track = TransformTrack::new(vec![track_entry(0.0, "lidar_link", 1.0)], 0.5);
        assert!(track.lookup("other_sensor", 0.0).is_none());
    }
}
