use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pipeline::StepTimings;

pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
}

/// Simulated step durations, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub upload_ms: u64,
    pub detection_ms: u64,
    pub recognition_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from(StepTimings::default())
    }
}

impl From<StepTimings> for SimulationConfig {
    fn from(timings: StepTimings) -> Self {
        Self {
            upload_ms: timings.upload.as_millis() as u64,
            detection_ms: timings.detection.as_millis() as u64,
            recognition_ms: timings.recognition.as_millis() as u64,
        }
    }
}

impl SimulationConfig {
    pub fn timings(&self) -> StepTimings {
        StepTimings {
            upload: Duration::from_millis(self.upload_ms),
            detection: Duration::from_millis(self.detection_ms),
            recognition: Duration::from_millis(self.recognition_ms),
        }
    }
}

/// Load `config.toml` from `dir`.
///
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_config(dir: &Path) -> AppConfig {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", config_path);
        return AppConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {:?}: {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}", config_path, e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(temp.path());

        assert_eq!(config.simulation.upload_ms, 500);
        assert_eq!(config.simulation.detection_ms, 1500);
        assert_eq!(config.simulation.recognition_ms, 1200);
        assert_eq!(config.simulation.timings(), StepTimings::default());
    }

    #[test]
    fn test_load_config_partial() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILENAME),
            "[simulation]\ndetection_ms = 40\n",
        )
        .unwrap();

        let config = load_config(temp.path());
        assert_eq!(config.simulation.upload_ms, 500);
        assert_eq!(config.simulation.detection_ms, 40);
        assert_eq!(
            config.simulation.timings().detection,
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILENAME), "not valid toml {{{{").unwrap();

        assert_eq!(load_config(temp.path()), AppConfig::default());
    }
}
