//! Loaders for recorded scan logs and transform tracks.
//!
//! Both inputs are CSV files:
//! - Scan logs: `Timestamp,Frame,AngleMin,AngleMax,Range_0..Range_N` with a
//!   flexible number of range columns per row
//! - Transform tracks: `Timestamp,Frame,Tx,Ty,Tz,Qx,Qy,Qz,Qw`

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use super::transforms::{RigidTransform, TrackEntry};
use super::types::LaserScan;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<T> {
    record
        .get(idx)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| LoaderError::MalformedRow {
            row,
            message: format!("missing or invalid {} value", name),
        })
}

/// Load a scan log from a CSV file, one scan per row.
///
/// Fixed columns: Timestamp(0), Frame(1), AngleMin(2), AngleMax(3); the
/// remaining columns are the ordered range readings. Range cells that fail
/// to parse are recorded as infinity, which the converter later treats as a
/// no-return reading.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a fixed column is
/// malformed, or the log contains no scans.
pub fn load_scan_log<P: AsRef<Path>>(path: P) -> Result<Vec<LaserScan>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut scans = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        if record.len() < 4 {
            return Err(LoaderError::MalformedRow {
                row,
                message: format!("expected at least 4 columns, found {}", record.len()),
            });
        }

        let timestamp: f64 = parse_field(&record, 0, "Timestamp", row)?;
        let frame_id = record
            .get(1)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let angle_min: f32 = parse_field(&record, 2, "AngleMin", row)?;
        let angle_max: f32 = parse_field(&record, 3, "AngleMax", row)?;

        let ranges: Vec<f32> = record
            .iter()
            .skip(4)
            .map(|s| s.trim().parse().unwrap_or(f32::INFINITY))
            .collect();

        scans.push(LaserScan::new(
            timestamp, frame_id, angle_min, angle_max, ranges,
        ));
    }

    if scans.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    Ok(scans)
}

/// Load a transform track from a CSV file, one transform sample per row.
///
/// Columns: Timestamp(0), Frame(1), Tx(2), Ty(3), Tz(4), Qx(5), Qy(6),
/// Qz(7), Qw(8). Quaternions are normalized on construction.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a numeric column is
/// malformed, or the track contains no samples.
pub fn load_transform_track<P: AsRef<Path>>(path: P) -> Result<Vec<TrackEntry>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut entries = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        if record.len() < 9 {
            return Err(LoaderError::MalformedRow {
                row,
                message: format!("expected 9 columns, found {}", record.len()),
            });
        }

        let timestamp: f64 = parse_field(&record, 0, "Timestamp", row)?;
        let frame_id = record
            .get(1)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let tx: f32 = parse_field(&record, 2, "Tx", row)?;
        let ty: f32 = parse_field(&record, 3, "Ty", row)?;
        let tz: f32 = parse_field(&record, 4, "Tz", row)?;
        let qx: f32 = parse_field(&record, 5, "Qx", row)?;
        let qy: f32 = parse_field(&record, 6, "Qy", row)?;
        let qz: f32 = parse_field(&record, 7, "Qz", row)?;
        let qw: f32 = parse_field(&record, 8, "Qw", row)?;

        entries.push(TrackEntry {
            timestamp,
            frame_id,
            transform: RigidTransform::from_translation_quaternion(
                [tx, ty, tz],
                [qx, qy, qz, qw],
            ),
        });
    }

    if entries.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    Ok(entries)
}
