// SPDX-License-Identifier: GPL-3.0-only

//! Runtime configuration
//!
//! Paths, storage targets and timing. Everything has a compiled-in default;
//! a JSON file can override any subset of fields. User preferences that the
//! UI changes live in [`crate::settings`], not here.

use crate::constants::{BUSY_FRAME_INTERVAL, PREVIEW_DWELL};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// A destination for captured images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTarget {
    /// Human-readable name
    pub name: String,
    /// Directory that receives `IMG_NNNN.JPG` files
    pub path: PathBuf,
    /// Icon drawn on the storage panel's radio button
    pub icon: String,
    /// Hand every capture to the uploader
    #[serde(default)]
    pub upload: bool,
}

/// External uploader command
///
/// Invoked as `<program> [-f <config_file>] upload <file> <remote_dir>/<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploaderConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub config_file: Option<PathBuf>,
    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,
}

fn default_remote_dir() -> String {
    "Photos".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of `<name>.png` icons
    pub icons_dir: PathBuf,
    /// Persisted settings record
    pub settings_path: PathBuf,
    /// Storage destinations, in radio-button order
    pub storage_targets: Vec<StorageTarget>,
    /// Uploader for targets with `upload` set
    pub uploader: Option<UploaderConfig>,
    /// Post-capture preview dwell
    pub preview_dwell_ms: u64,
    /// Busy spinner frame interval
    pub busy_frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let photos = home.join("Photos");
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| home.join(".config"))
            .join("touchcam");

        Self {
            icons_dir: config_dir.join("icons"),
            settings_path: config_dir.join("settings.json"),
            storage_targets: vec![
                StorageTarget {
                    name: "Local".to_string(),
                    path: photos.clone(),
                    icon: "store-folder".to_string(),
                    upload: false,
                },
                StorageTarget {
                    name: "Boot partition".to_string(),
                    path: PathBuf::from("/boot/DCIM/CANON999"),
                    icon: "store-boot".to_string(),
                    upload: false,
                },
                StorageTarget {
                    name: "Upload".to_string(),
                    path: photos,
                    icon: "store-upload".to_string(),
                    upload: true,
                },
            ],
            uploader: None,
            preview_dwell_ms: PREVIEW_DWELL.as_millis() as u64,
            busy_frame_ms: BUSY_FRAME_INTERVAL.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load a JSON config file; fields missing from the file keep their defaults
    ///
    /// Unlike the settings record this is strict: an explicitly requested
    /// config file that cannot be read is an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Check invariants the UI relies on
    pub fn validate(&self) -> AppResult<()> {
        if self.storage_targets.is_empty() {
            return Err(AppError::Config(
                "at least one storage target is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn preview_dwell(&self) -> Duration {
        Duration::from_millis(self.preview_dwell_ms)
    }

    pub fn busy_frame_interval(&self) -> Duration {
        Duration::from_millis(self.busy_frame_ms)
    }
}
