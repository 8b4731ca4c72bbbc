//! Pipeline configuration: JSON file with defaults for every field.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::recognizer::Rotation;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width of the recognition area (ROI) in pixels.
    pub recognition_area_width: u32,
    /// Height of the recognition area (ROI) in pixels.
    pub recognition_area_height: u32,
    /// Edge length of the fixed cursor rectangle in pixels.
    pub cursor_size: u32,
    /// Frame rotation handed to the recognizer (fixed per pipeline).
    pub rotation: Rotation,
    /// Per-request recognition timeout; on expiry the gate is cleared and
    /// a timeout failure is counted.
    pub recognition_timeout_ms: u64,
    /// Sample capacity of each latency histogram ring.
    pub metrics_ring_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recognition_area_width: 250,
            recognition_area_height: 120,
            cursor_size: 8,
            rotation: Rotation::Deg0,
            recognition_timeout_ms: 2000,
            metrics_ring_capacity: 256,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config read failed: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl PipelineConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        info!(path = %path.display(), "pipeline config loaded");
        Ok(config)
    }

    pub fn recognition_timeout(&self) -> Duration {
        Duration::from_millis(self.recognition_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recognition_area_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.recognition_area_width, 250);
        assert_eq!(config.recognition_area_height, 120);
        assert_eq!(config.recognition_timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"recognition_timeout_ms": 500}"#).unwrap();
        assert_eq!(config.recognition_timeout_ms, 500);
        assert_eq!(config.recognition_area_width, 250);
        assert_eq!(config.rotation, Rotation::Deg0);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = PipelineConfig::load_from_file(Path::new("/nonexistent/wordlens.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
