//! Command-line interface for the dimension pipeline.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::PipelineConfig;

#[derive(Parser)]
#[command(name = "lidar-dimension")]
#[command(about = "LIDAR scan object dimension estimation pipeline", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scan log against a transform track and estimate dimensions
    Process {
        /// Input scan log CSV file
        scans: PathBuf,
        /// Transform track CSV file
        transforms: PathBuf,
        /// Output report CSV file
        #[arg(short, long, default_value = "reports.csv")]
        output: PathBuf,
    },

    /// Plot one scan top-down with the estimated bounding box (PNG)
    Visualize {
        /// Input scan log CSV file
        scans: PathBuf,
        /// Transform track CSV file
        transforms: PathBuf,
        /// Zero-based index of the scan to plot
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        /// Output PNG file path (defaults to scan_<index>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration to a YAML file
    WriteConfig {
        /// Output YAML file path
        #[arg(default_value = "pipeline.yaml")]
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Process {
            scans,
            transforms,
            output,
        } => {
            cmd_process(&scans, &transforms, &output, &config);
        }
        Commands::Visualize {
            scans,
            transforms,
            index,
            output,
        } => {
            cmd_visualize(&scans, &transforms, index, output, &config);
        }
        Commands::WriteConfig { path } => {
            cmd_write_config(&path, &config);
        }
    }
}

fn cmd_process(scans: &PathBuf, transforms: &PathBuf, output: &PathBuf, config: &PipelineConfig) {
    use crate::core::types::ReplayOutcome;
    use crate::processors::pipeline;

    let start = Instant::now();

    println!("Replaying scan log...");
    println!("Scans: {}", scans.display());
    println!("Transforms: {}", transforms.display());
    println!("Output: {}", output.display());

    let spinner = create_spinner("Processing scans...");

    match pipeline::replay_files(scans, transforms, output, config) {
        Ok(reports) => {
            spinner.finish_and_clear();

            let object_count = reports
                .iter()
                .filter(|r| matches!(r.outcome, ReplayOutcome::Object(_)))
                .count();
            let no_object_count = reports
                .iter()
                .filter(|r| matches!(r.outcome, ReplayOutcome::NoObject))
                .count();
            let unavailable_count = reports
                .iter()
                .filter(|r| matches!(r.outcome, ReplayOutcome::TransformUnavailable))
                .count();

            print_summary(
                "Replay Complete",
                &[
                    ("Scan log", scans.display().to_string()),
                    ("Scans processed", reports.len().to_string()),
                    ("Objects detected", object_count.to_string()),
                    ("No object", no_object_count.to_string()),
                    ("No transform", unavailable_count.to_string()),
                    ("Report", output.display().to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Replay failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_visualize(
    scans: &PathBuf,
    transforms: &PathBuf,
    index: usize,
    output: Option<PathBuf>,
    config: &PipelineConfig,
) {
    use crate::core::loaders;
    use crate::core::transforms::{TransformSource, TransformTrack};
    use crate::core::types::ScanOutcome;
    use crate::processors::{frame, ground, polar, ScanProcessor};
    use crate::visualization;

    let start = Instant::now();

    let output_path = output.unwrap_or_else(|| PathBuf::from(format!("scan_{}.png", index)));

    println!("Visualizing scan {}...", index);
    println!("Scans: {}", scans.display());
    println!("Output: {}", output_path.display());

    let spinner = create_spinner("Loading scan log and transform track...");

    let scan_log = match loaders::load_scan_log(scans) {
        Ok(s) => s,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to load scan log: {}", e);
            std::process::exit(1);
        }
    };

    let scan = match scan_log.get(index) {
        Some(s) => s,
        None => {
            spinner.finish_and_clear();
            error!(
                "Scan index {} out of range: log has {} scans",
                index,
                scan_log.len()
            );
            std::process::exit(1);
        }
    };

    let entries = match loaders::load_transform_track(transforms) {
        Ok(t) => t,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to load transform track: {}", e);
            std::process::exit(1);
        }
    };

    let track = TransformTrack::new(entries, config.transform.time_tolerance_s);

    let transform = match track.lookup(&scan.frame_id, scan.timestamp) {
        Some(t) => t,
        None => {
            spinner.finish_and_clear();
            error!(
                "No transform for frame '{}' at t={:.3}",
                scan.frame_id, scan.timestamp
            );
            std::process::exit(1);
        }
    };

    spinner.set_message("Generating plot...");

    // Run the geometric stages so the plot shows the partition the
    // estimate was derived from.
    let local = polar::scan_to_local_points(scan, config.sensor.max_valid_range);
    let world = frame::to_world(&transform, &local);
    let partition = ground::split_at_ground(&world, config.sensor.ground_height_threshold);

    let result = match ScanProcessor::new(&config.sensor).process(scan, &transform) {
        ScanOutcome::Object(r) => Some(r),
        ScanOutcome::NoObject => None,
    };

    match visualization::plot_scan(
        &output_path,
        &partition,
        result.as_ref(),
        config.plot.max_points,
    ) {
        Ok(()) => {
            spinner.finish_and_clear();

            let detection = match &result {
                Some(r) => format!(
                    "L={:.2} W={:.2} H={:.2}",
                    r.length, r.width, r.height
                ),
                None => "no object".to_string(),
            };

            print_summary(
                "Visualization Complete",
                &[
                    ("Scan timestamp", format!("{:.3}", scan.timestamp)),
                    ("Ground points", partition.ground.len().to_string()),
                    ("Hit points", partition.hits.len().to_string()),
                    ("Detection", detection),
                    ("Output PNG", output_path.display().to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Visualization failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_write_config(path: &PathBuf, config: &PipelineConfig) {
    match config.to_yaml(path) {
        Ok(()) => {
            println!("Wrote configuration to {}", path.display());
        }
        Err(e) => {
            error!("Failed to write config: {}", e);
            std::process::exit(1);
        }
    }
}
