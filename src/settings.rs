// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user preferences
//!
//! The record on disk is a small JSON object with named, optional fields:
//!
//! ```json
//! { "fx": 0, "iso": 3, "size": 1, "store": 0 }
//! ```
//!
//! Loading is best-effort and per field. Unknown keys are ignored, and a
//! missing, mistyped or out-of-range field keeps the compiled-in default
//! while the other fields still load. Saving never fails the caller.

use crate::constants::{EFFECTS, ISO_STEPS, IsoStep, SIZE_PRESETS, SizePreset};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// In-memory settings: indices into the fixed tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Index into [`EFFECTS`]
    pub effect: usize,
    /// Index into [`ISO_STEPS`]
    pub iso: usize,
    /// Index into [`SIZE_PRESETS`]
    pub size: usize,
    /// Index into the configured storage targets
    pub storage: usize,
}

/// On-disk shape of the settings record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct SettingsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    fx: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iso: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<usize>,
}

impl SettingsRecord {
    /// Pull each field out independently so one bad value cannot spoil the rest
    fn from_json(text: &str) -> Self {
        let map = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Settings record is not an object, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(error = %e, "Settings record is corrupt, using defaults");
                return Self::default();
            }
        };

        fn field(map: &Map<String, Value>, key: &str) -> Option<usize> {
            let value = map.get(key)?;
            match value.as_u64() {
                Some(n) => usize::try_from(n).ok(),
                None => {
                    warn!(key, value = %value, "Ignoring malformed settings field");
                    None
                }
            }
        }

        Self {
            fx: field(&map, "fx"),
            iso: field(&map, "iso"),
            size: field(&map, "size"),
            store: field(&map, "store"),
        }
    }
}

impl Settings {
    /// Load from `path`, falling back to defaults field by field
    ///
    /// `storage_targets` is the number of configured storage targets, used to
    /// reject stale storage indices.
    pub fn load(path: &Path, storage_targets: usize) -> Self {
        let mut settings = Settings::default();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                settings.apply_record(&text, storage_targets);
                info!(path = %path.display(), ?settings, "Loaded settings");
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No settings record, using defaults");
            }
        }
        settings
    }

    /// Overlay the valid fields of a JSON record onto `self`
    pub fn apply_record(&mut self, text: &str, storage_targets: usize) {
        let record = SettingsRecord::from_json(text);

        if let Some(fx) = in_range("fx", record.fx, EFFECTS.len()) {
            self.effect = fx;
        }
        if let Some(iso) = in_range("iso", record.iso, ISO_STEPS.len()) {
            self.iso = iso;
        }
        if let Some(size) = in_range("size", record.size, SIZE_PRESETS.len()) {
            self.size = size;
        }
        if let Some(store) = in_range("store", record.store, storage_targets) {
            self.storage = store;
        }
    }

    /// Serialized record
    pub fn to_json(&self) -> String {
        let record = SettingsRecord {
            fx: Some(self.effect),
            iso: Some(self.iso),
            size: Some(self.size),
            store: Some(self.storage),
        };
        serde_json::to_string_pretty(&record).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write the record; failures are logged and swallowed
    ///
    /// Returns whether the record reached the disk.
    pub fn save(&self, path: &Path) -> bool {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Cannot create settings directory");
            return false;
        }

        match std::fs::write(path, self.to_json()) {
            Ok(()) => {
                debug!(path = %path.display(), "Saved settings");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to save settings");
                false
            }
        }
    }

    pub fn effect_name(&self) -> &'static str {
        EFFECTS[self.effect % EFFECTS.len()]
    }

    pub fn iso_step(&self) -> IsoStep {
        ISO_STEPS[self.iso.min(ISO_STEPS.len() - 1)]
    }

    pub fn size_preset(&self) -> &'static SizePreset {
        &SIZE_PRESETS[self.size.min(SIZE_PRESETS.len() - 1)]
    }
}

fn in_range(key: &str, value: Option<usize>, len: usize) -> Option<usize> {
    match value {
        Some(v) if v < len => Some(v),
        Some(v) => {
            warn!(key, value = v, len, "Settings field out of range, keeping default");
            None
        }
        None => None,
    }
}
