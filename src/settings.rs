//! Runtime settings
//!
//! Persisted as JSON. Missing fields fall back to their defaults, so a
//! settings file only needs the values it changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SEED, END_DELAY, MAX_FRAME_STEP, PIXELS_PER_TILE};
use crate::render::Viewport;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize settings for {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("setting {field} has invalid value {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Pixels per tile
    pub scale: f32,
    /// Viewport size in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Timing ===
    /// Longest step a single frame may simulate (seconds)
    pub max_frame_step: f32,
    /// How long a won or lost level stays up before moving on (seconds)
    pub end_delay: f32,
    /// Frames per second for headless and real-time runs
    pub frame_rate: f32,

    // === Levels ===
    /// Seed for collectible phases
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: PIXELS_PER_TILE,
            viewport_width: 600.0,
            viewport_height: 450.0,

            max_frame_step: MAX_FRAME_STEP,
            end_delay: END_DELAY,
            frame_rate: 60.0,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Simulated seconds per frame at `frame_rate`, within
    /// `0..=max_frame_step`
    pub fn frame_step(&self) -> f32 {
        let max = self.max_frame_step.max(0.0);
        if self.frame_rate.is_nan() || self.frame_rate <= 0.0 {
            return max;
        }
        (1.0 / self.frame_rate).clamp(0.0, max)
    }

    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks = [
            ("max_frame_step", self.max_frame_step, self.max_frame_step > 0.0),
            ("end_delay", self.end_delay, self.end_delay >= 0.0),
            ("frame_rate", self.frame_rate, self.frame_rate >= 0.0),
            ("scale", self.scale, self.scale > 0.0),
            ("viewport_width", self.viewport_width, self.viewport_width > 0.0),
            ("viewport_height", self.viewport_height, self.viewport_height > 0.0),
        ];
        for (field, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(SettingsError::Invalid { field, value });
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height, self.scale)
    }

    /// Load settings from `path`; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
