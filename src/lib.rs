//! LIDAR scan object dimension estimation pipeline.
//!
//! This crate provides tools for:
//! - Loading recorded planar scan logs and sensor transform tracks (CSV)
//! - Converting polar range sweeps to Cartesian points in the sensor frame
//! - Transforming points into a fixed world frame
//! - Separating ground-plane returns from object hits
//! - Estimating object length, width, height, and centroid per scan
//!
//! # Example
//!
//! ```no_run
//! use lidar_dimension::core::loaders::{load_scan_log, load_transform_track};
//! use lidar_dimension::core::transforms::TransformTrack;
//! use lidar_dimension::processors::replay;
//! use lidar_dimension::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! let scans = load_scan_log("scans.csv").unwrap();
//! let entries = load_transform_track("transforms.csv").unwrap();
//! let track = TransformTrack::new(entries, config.transform.time_tolerance_s);
//! let reports = replay(&scans, &track, &config);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use config::{PipelineConfig, PlotConfig, SensorConfig, TransformConfig};
pub use core::types::{DimensionResult, LaserScan, Point3, ReplayOutcome, ScanOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
