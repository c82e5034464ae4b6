//! Top-down scan visualization.
//!
//! Renders one scan's world-frame points as a 2D scatter plot (x vs y):
//! ground returns in gray, object hits in orange, with the estimated
//! bounding rectangle outlined when an object was detected.

use std::path::Path;

use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::core::types::DimensionResult;
use crate::processors::ground::GroundPartition;

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plotting error: {0}")]
    PlottingError(String),

    #[error("No points to plot")]
    EmptyScan,
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Default plot width in pixels.
const DEFAULT_WIDTH: u32 = 1280;

/// Default plot height in pixels.
const DEFAULT_HEIGHT: u32 = 960;

/// Color for ground-plane returns.
const GROUND_COLOR: RGBColor = RGBColor(153, 153, 153);

/// Color for object hit points.
const HIT_COLOR: RGBColor = RGBColor(255, 127, 0);

/// Color for the estimated bounding rectangle.
const BOX_COLOR: RGBColor = RGBColor(55, 126, 184);

/// Plot a partitioned scan top-down and save as PNG.
///
/// # Arguments
///
/// * `output_path` - Path to save the PNG image
/// * `partition` - World points split into ground and hit sets
/// * `result` - Estimated dimensions, if an object was detected
/// * `max_points` - Maximum number of points to draw (subsamples if exceeded)
pub fn plot_scan(
    output_path: &Path,
    partition: &GroundPartition,
    result: Option<&DimensionResult>,
    max_points: usize,
) -> Result<()> {
    if partition.total() == 0 {
        return Err(VisualizationError::EmptyScan);
    }

    let mut points: Vec<(f32, f32, RGBColor)> = Vec::with_capacity(partition.total());
    for p in &partition.ground {
        points.push((p.x, p.y, GROUND_COLOR));
    }
    for p in &partition.hits {
        points.push((p.x, p.y, HIT_COLOR));
    }

    // Subsample if the scan is unexpectedly dense
    let step = if points.len() > max_points {
        points.len() / max_points
    } else {
        1
    };

    let (x_min, x_max, y_min, y_max) = compute_bounds(&points);
    let x_padding = (x_max - x_min) * 0.05;
    let y_padding = (y_max - y_min) * 0.05;

    let root =
        BitMapBackend::new(output_path, (DEFAULT_WIDTH, DEFAULT_HEIGHT)).into_drawing_area();

    root.fill(&WHITE)
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(
            (x_min - x_padding)..(x_max + x_padding),
            (y_min - y_padding)..(y_max + y_padding),
        )
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .step_by(step)
                .map(|(x, y, color)| Circle::new((*x, *y), 2, color.filled())),
        )
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    // Outline the estimated object footprint
    if let Some(result) = result {
        let min = result.extrema.min;
        let max = result.extrema.max;
        let corners = vec![
            (min.x, min.y),
            (max.x, min.y),
            (max.x, max.y),
            (min.x, max.y),
            (min.x, min.y),
        ];

        chart
            .draw_series(std::iter::once(PathElement::new(
                corners,
                BOX_COLOR.stroke_width(2),
            )))
            .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

        chart
            .draw_series(std::iter::once(Cross::new(
                (result.centroid.x, result.centroid.y),
                6,
                BOX_COLOR.stroke_width(2),
            )))
            .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;
    }

    root.present()
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    Ok(())
}

/// Compute the bounds (min/max) for x and y coordinates.
fn compute_bounds(points: &[(f32, f32, RGBColor)]) -> (f32, f32, f32, f32) {
    let mut x_min = f32::MAX;
    let mut x_max = f32::MIN;
    let mut y_min = f32::MAX;
    let mut y_max = f32::MIN;

    for (x, y, _) in points {
        if *x < x_min {
            x_min = *x;
        }
        if *x > x_max {
            x_max = *x;
        }
        if *y < y_min {
            y_min = *y;
        }
        if *y > y_max {
            y_max = *y;
        }
    }

    if (x_max - x_min).abs() < f32::EPSILON {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if (y_max - y_min).abs() < f32::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    (x_min, x_max, y_min, y_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Extrema, Point3};
    use crate::processors::ground::split_at_ground;
    use tempfile::TempDir;

    #[test]
    fn test_plot_empty_scan_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");

        let partition = GroundPartition::default();
        let result = plot_scan(&path, &partition, None, 1000);
        assert!(matches!(result, Err(VisualizationError::EmptyScan)));
    }

    #[test]
    fn test_plot_scan_with_box() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");

        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.2),
            Point3::new(3.0, 3.0, 0.2),
        ];
        let partition = split_at_ground(&points, 0.1);

        let extrema = Extrema {
            min: Point3::new(1.0, 1.0, 0.2),
            max: Point3::new(3.0, 3.0, 0.2),
        };
        let result = crate::processors::dimensions::estimate(&extrema);

        plot_scan(&path, &partition, Some(&result), 1000).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_compute_bounds_degenerate() {
        let points = vec![(2.0, 3.0, GROUND_COLOR)];
        let (x_min, x_max, y_min, y_max) = compute_bounds(&points);
        assert!(x_max > x_min);
        assert!(y_max > y_min);
    }
}
