//! Configuration types for the dimension pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the scanning range sensor and ground filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Maximum valid range in meters; readings at or beyond this are
    /// discarded (near-parallel to the ground plane or no return)
    #[serde(default = "default_max_valid_range")]
    pub max_valid_range: f32,

    /// World-frame height threshold in meters; points below it are ground
    #[serde(default = "default_ground_height_threshold")]
    pub ground_height_threshold: f32,

    /// Frame identifier the sensor reports its scans in
    #[serde(default = "default_sensor_frame")]
    pub sensor_frame: String,

    /// Fixed reference frame dimensions are reported in
    #[serde(default = "default_world_frame")]
    pub world_frame: String,
}

fn default_max_valid_range() -> f32 {
    5.0
}

fn default_ground_height_threshold() -> f32 {
    0.1
}

fn default_sensor_frame() -> String {
    "lidar_link".to_string()
}

fn default_world_frame() -> String {
    "world".to_string()
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_valid_range: default_max_valid_range(),
            ground_height_threshold: default_ground_height_threshold(),
            sensor_frame: default_sensor_frame(),
            world_frame: default_world_frame(),
        }
    }
}

/// Configuration for transform-track lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Maximum time difference in seconds between a scan and the nearest
    /// recorded transform for the lookup to succeed
    #[serde(default = "default_time_tolerance_s")]
    pub time_tolerance_s: f64,
}

fn default_time_tolerance_s() -> f64 {
    0.5
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            time_tolerance_s: default_time_tolerance_s(),
        }
    }
}

/// Configuration for plot output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Maximum number of points to draw per scan plot
    #[serde(default = "default_plot_max_points")]
    pub max_points: usize,
}

fn default_plot_max_points() -> usize {
    100_000
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_points: default_plot_max_points(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub sensor: SensorConfig,

    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default)]
    pub plot: PlotConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sensor_config() {
        let config = SensorConfig::default();
        assert_eq!(config.max_valid_range, 5.0);
        assert_eq!(config.ground_height_threshold, 0.1);
        assert_eq!(config.sensor_frame, "lidar_link");
        assert_eq!(config.world_frame, "world");
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.transform.time_tolerance_s, 0.5);
        assert_eq!(config.plot.max_points, 100_000);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = PipelineConfig::default();
        config.sensor.max_valid_range = 8.0;
        config.to_yaml(&path).unwrap();

        let loaded = PipelineConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded.sensor.max_valid_range, 8.0);
        assert_eq!(loaded.sensor.world_frame, "world");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("partial.yaml");
        std::fs::write(&path, "sensor:\n  max_valid_range: 10.0\n").unwrap();

        let config = PipelineConfig::from_yaml(&path).unwrap();
        assert_eq!(config.sensor.max_valid_range, 10.0);
        assert_eq!(config.sensor.ground_height_threshold, 0.1);
        assert_eq!(config.transform.time_tolerance_s, 0.5);
    }
}
