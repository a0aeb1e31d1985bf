use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::behavior::domain::behavior_classifier::BehaviorThresholds;
use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BLINK_DEBOUNCE_FRAMES, DEFAULT_BLINK_THRESHOLD,
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HEAD_MOVEMENT_THRESHOLD, DEFAULT_MAX_MISSING_FRAMES,
    DEFAULT_SMILE_THRESHOLD, DEFAULT_TARGET_IDENTITY,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("target identity must not be empty")]
    EmptyTarget,
    #[error("confidence threshold must be between 0.0 and 1.0, got {0}")]
    ConfidenceOutOfRange(f64),
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Process-wide tracker configuration. Read once at startup and never
/// mutated while frames are being processed.
///
/// Every field is optional in the JSON file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub target_identity: String,
    pub confidence_threshold: f64,
    pub max_missing_frames: u32,
    pub head_movement_threshold: f64,
    pub smile_threshold: f64,
    pub blink_threshold: f64,
    pub blink_debounce_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            target_identity: DEFAULT_TARGET_IDENTITY.to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_missing_frames: DEFAULT_MAX_MISSING_FRAMES,
            head_movement_threshold: DEFAULT_HEAD_MOVEMENT_THRESHOLD,
            smile_threshold: DEFAULT_SMILE_THRESHOLD,
            blink_threshold: DEFAULT_BLINK_THRESHOLD,
            blink_debounce_frames: DEFAULT_BLINK_DEBOUNCE_FRAMES,
        }
    }
}

impl TrackerConfig {
    /// `<platform config dir>/FaceTrack/config.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parses a config file. Does not validate; call [`Self::validate`]
    /// after applying any overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the file at `path`, or the default location when `path` is
    /// `None`. A missing default file yields the built-in defaults; an
    /// explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(p) if p.exists() => Self::load(&p),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_identity.trim().is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if !self.confidence_threshold.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "confidence_threshold",
            });
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ConfidenceOutOfRange(self.confidence_threshold));
        }
        let thresholds = [
            ("head_movement_threshold", self.head_movement_threshold),
            ("smile_threshold", self.smile_threshold),
            ("blink_threshold", self.blink_threshold),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    pub fn behavior_thresholds(&self) -> BehaviorThresholds {
        BehaviorThresholds {
            head_movement: self.head_movement_threshold,
            smile_span: self.smile_threshold,
            eye_closure: self.blink_threshold,
            blink_debounce_frames: self.blink_debounce_frames,
        }
    }
}
