//! Writers for per-scan replay reports.
//!
//! Reports are written as CSV with one row per scan: the outcome, the
//! estimated dimensions and centroid, and the raw per-axis extrema kept for
//! diagnostics. Rows without an object leave the numeric columns empty
//! rather than writing fabricated zeros.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use super::types::{ReplayOutcome, ScanReport};

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush buffered output to disk.
    #[error("failed to flush '{path}': {source}")]
    Flush {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Outcome column value for a report row.
fn outcome_label(outcome: &ReplayOutcome) -> &'static str {
    match outcome {
        ReplayOutcome::Object(_) => "object",
        ReplayOutcome::NoObject => "no_object",
        ReplayOutcome::TransformUnavailable => "transform_unavailable",
    }
}

/// Write per-scan reports to a CSV file.
///
/// Columns: `Timestamp,Outcome,Length,Width,Height,CentroidX,CentroidY,
/// CentroidZ,MinX,MinY,MinZ,MaxX,MaxY,MaxZ`. The dimension and extrema
/// columns are empty for `no_object` and `transform_unavailable` rows.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the CSV
/// cannot be written.
pub fn write_reports(path: &Path, reports: &[ScanReport]) -> Result<()> {
    ensure_parent_dirs(path)?;
    let path_str = path.display().to_string();

    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path_str.clone(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer
        .write_record([
            "Timestamp",
            "Outcome",
            "Length",
            "Width",
            "Height",
            "CentroidX",
            "CentroidY",
            "CentroidZ",
            "MinX",
            "MinY",
            "MinZ",
            "MaxX",
            "MaxY",
            "MaxZ",
        ])
        .map_err(|e| WriteError::Csv {
            path: path_str.clone(),
            source: e,
        })?;

    for report in reports {
        let row: Vec<String> = match &report.outcome {
            ReplayOutcome::Object(result) => vec![
                format!("{:.6}", report.timestamp),
                outcome_label(&report.outcome).to_string(),
                format!("{:.6}", result.length),
                format!("{:.6}", result.width),
                format!("{:.6}", result.height),
                format!("{:.6}", result.centroid.x),
                format!("{:.6}", result.centroid.y),
                format!("{:.6}", result.centroid.z),
                format!("{:.6}", result.extrema.min.x),
                format!("{:.6}", result.extrema.min.y),
                format!("{:.6}", result.extrema.min.z),
                format!("{:.6}", result.extrema.max.x),
                format!("{:.6}", result.extrema.max.y),
                format!("{:.6}", result.extrema.max.z),
            ],
            _ => {
                let mut row = vec![
                    format!("{:.6}", report.timestamp),
                    outcome_label(&report.outcome).to_string(),
                ];
                row.extend(std::iter::repeat(String::new()).take(12));
                row
            }
        };

        writer.write_record(&row).map_err(|e| WriteError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| WriteError::Flush {
        path: path_str,
        source: e,
    })?;

    Ok(())
}
