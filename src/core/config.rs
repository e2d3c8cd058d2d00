// Solver configuration: marker colors and thresholds the strategies key on.
//
// Every field has a default matching the fixed sentinels the detectors were
// tuned against, so an empty JSON object is a valid config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub frame_color: u8,
    pub path_start: u8,
    pub path_end: u8,
    /// Fraction of training pairs that must show tip evidence.
    pub tip_evidence_ratio: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frame_color: 4,
            path_start: 3,
            path_end: 2,
            tip_evidence_ratio: 0.8,
        }
    }
}

impl SolverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn partial_override() {
        let config: SolverConfig = serde_json::from_str(r#"{"frame_color": 8}"#).unwrap();
        assert_eq!(config.frame_color, 8);
        assert_eq!(config.path_start, 3);
        assert_eq!(config.tip_evidence_ratio, 0.8);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"path_start": 1, "path_end": 9}"#).unwrap();
        let config = SolverConfig::load(&path).unwrap();
        assert_eq!(config.path_start, 1);
        assert_eq!(config.path_end, 9);
    }
}
