//! Host settings
//!
//! Persisted as JSON next to the ledger. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::COOLDOWN_MS;
use crate::economy::CooldownGate;

/// Failure loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Game host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum time between paid sessions, in minutes
    pub cooldown_minutes: u64,
    /// Fixed RNG seed (replays); unset seeds each session from the clock
    pub seed: Option<u64>,

    // === Headless host ===
    /// Synthetic frame interval in ms
    pub frame_interval_ms: u64,
    /// Force-stop the session after this many frames
    pub max_frames: u32,
    /// Print the final scene as text
    pub print_scene: bool,
    /// Character grid used when printing the scene
    pub scene_cols: usize,
    pub scene_rows: usize,

    /// Where the coin ledger lives
    pub ledger_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cooldown_minutes: COOLDOWN_MS / 60_000,
            seed: None,

            frame_interval_ms: 16,
            max_frames: 60 * 60 * 5,
            print_scene: true,
            scene_cols: 30,
            scene_rows: 20,

            ledger_path: PathBuf::from("cloud_hop_ledger.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "cloud_hop_settings.json";

    /// Load settings from `path`, falling back to defaults if it doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_interval_ms == 0 {
            return Err(SettingsError::Zero {
                field: "frame_interval_ms",
            });
        }
        if self.max_frames == 0 {
            return Err(SettingsError::Zero { field: "max_frames" });
        }
        Ok(())
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_minutes.saturating_mul(60_000)
    }

    /// Cooldown gate configured from these settings
    pub fn gate(&self) -> CooldownGate {
        CooldownGate::new(self.cooldown_ms())
    }
}
