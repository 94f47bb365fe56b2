//! Application configuration, persisted as TOML.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use sign_rules::Thresholds;
use sign_session::{CameraConstraints, SessionTuning};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Classifier thresholds; defaults are the tuned values.
    pub thresholds: Thresholds,
    pub camera: CameraConstraints,
    /// Minimum spacing between classifications.
    pub classify_interval_ms: u64,
    /// Pause between "100%" and Ready.
    pub settle_delay_ms: u64,
    /// Simulated inference latency per estimate.
    pub sim_latency_ms: u64,
    /// Positional wobble applied to simulated landmarks, in pixels.
    pub sim_jitter_px: f32,
    /// Simulated model load: progress steps and per-step delay.
    pub sim_load_steps: u32,
    pub sim_load_step_ms: u64,
    /// External text-to-speech command (receives the text as its single
    /// argument).  Empty → speech is only logged.
    pub speech_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            thresholds: Thresholds::default(),
            camera: CameraConstraints::default(),
            classify_interval_ms: 100,
            settle_delay_ms: 500,
            sim_latency_ms: 30,
            sim_jitter_px: 1.5,
            sim_load_steps: 24,
            sim_load_step_ms: 40,
            speech_command: String::new(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn tuning(&self) -> SessionTuning {
        SessionTuning {
            classify_interval: Duration::from_millis(self.classify_interval_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.toml");

        let config = AppConfig {
            sim_jitter_px: 0.0,
            speech_command: "espeak".to_string(),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.toml");
        fs::write(&path, "classify_interval_ms = 50\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.classify_interval_ms, 50);
        assert_eq!(config.settle_delay_ms, 500);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn tuning_uses_the_configured_intervals() {
        let config = AppConfig { classify_interval_ms: 250, ..AppConfig::default() };
        assert_eq!(config.tuning().classify_interval, Duration::from_millis(250));
    }
}
