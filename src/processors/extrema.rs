//! Running per-axis extrema over a scan's hit points.
//!
//! The accumulator is an explicit two-state machine: empty until the first
//! point is folded in, populated afterwards. Reading extremes from an empty
//! accumulator is an error, never a silent zero or sentinel. Seeding bounds
//! with sentinels breaks whenever the object sits in an unexpected quadrant.

use thiserror::Error;

use crate::core::types::{Extrema, Point3};

/// Errors from reading an accumulator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtremaError {
    #[error("insufficient data: no hit points have been folded in")]
    InsufficientData,
}

/// Per-scan accumulator of per-axis minima and maxima.
///
/// A fresh accumulator must be created for every scan; carrying one across
/// scans would contaminate the new scan's bounds with the previous scan's
/// points.
#[derive(Debug, Clone, Default)]
pub struct ExtremaAccumulator {
    bounds: Option<Extrema>,
}

impl ExtremaAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no point has been folded in yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Fold one hit point into the running bounds.
    ///
    /// The first point seeds both min and max on every axis; subsequent
    /// points update each axis's min and max independently.
    pub fn fold(&mut self, point: Point3) {
        self.bounds = Some(match self.bounds {
            None => Extrema {
                min: point,
                max: point,
            },
            Some(extrema) => Extrema {
                min: extrema.min.min(&point),
                max: extrema.max.max(&point),
            },
        });
    }

    /// Read the accumulated extrema.
    ///
    /// # Errors
    ///
    /// `ExtremaError::InsufficientData` if nothing has been folded in;
    /// callers must not derive dimensions from an empty accumulator.
    pub fn extremes(&self) -> Result<Extrema, ExtremaError> {
        self.bounds.ok_or(ExtremaError::InsufficientData)
    }
}
