use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animate::AnimationConfig;
use crate::camera::CameraConfig;
use crate::controller::MovementConfig;
use crate::pickup::PickupRules;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Every gameplay tunable. Missing sections and fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    /// Actor spawn point; its height is also the ground-contact height.
    pub spawn: Vec3,
    pub pickups: PickupRules,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            spawn: Vec3::new(0.0, 1.0, 0.0),
            pickups: PickupRules::default(),
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load from `.yaml`, `.yml`, or `.json`, then validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        for (name, value) in [
            ("movement.speed", m.speed),
            ("movement.jump_force", m.jump_force),
            ("movement.gravity", m.gravity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&m.friction) {
            return Err(ConfigError::Invalid(format!(
                "movement.friction must be within [0, 1], got {}",
                m.friction
            )));
        }
        let smoothing = self.camera.smoothing;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.smoothing must be within (0, 1], got {smoothing}"
            )));
        }
        let radius = self.pickups.radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pickups.radius must be positive, got {radius}"
            )));
        }
        if !self.spawn.is_finite() {
            return Err(ConfigError::Invalid("spawn must be finite".into()));
        }
        Ok(())
    }
}
