// SPDX-License-Identifier: GPL-3.0-only

//! Settings panel controls

use crate::app::{App, ScreenRole, SettingsPanel, layout};
use crate::constants::{EFFECTS, ISO_STEPS, SIZE_PRESETS};
use tracing::debug;

impl App {
    pub(crate) fn on_storage(&mut self, index: i32) {
        let count = self.config.storage_targets.len();
        let Some(index) = usize::try_from(index).ok().filter(|i| *i < count) else {
            return;
        };
        self.settings.storage = index;
        self.select_radio(
            ScreenRole::Settings(SettingsPanel::Storage),
            layout::FIRST_RADIO,
            count,
            index,
        );
        debug!(storage = %self.storage_target().name, "Storage target selected");
    }

    pub(crate) fn on_size(&mut self, index: i32) {
        let Some(index) = usize::try_from(index)
            .ok()
            .filter(|i| *i < SIZE_PRESETS.len())
        else {
            return;
        };
        self.settings.size = index;
        self.select_radio(
            ScreenRole::Settings(SettingsPanel::Size),
            layout::FIRST_RADIO,
            SIZE_PRESETS.len(),
            index,
        );
        self.apply_preview_mode();
    }

    /// Cycle the effect, wrapping at both ends
    pub(crate) fn on_effect_step(&mut self, step: i32) {
        let len = EFFECTS.len() as i64;
        self.settings.effect = (self.settings.effect as i64 + step as i64).rem_euclid(len) as usize;
        self.apply_effect();
    }

    /// Step ISO, stopping at the ends of the scale
    pub(crate) fn on_iso_step(&mut self, step: i32) {
        let max = ISO_STEPS.len() as i64 - 1;
        let next = (self.settings.iso as i64 + step as i64).clamp(0, max) as usize;
        if next != self.settings.iso {
            self.settings.iso = next;
            self.apply_iso();
        }
    }
}
