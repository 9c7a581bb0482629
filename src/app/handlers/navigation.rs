// SPDX-License-Identifier: GPL-3.0-only

//! Screen transitions and the shutter
//!
//! Handles the viewfinder buttons (gear, play, shutter), "done", settings
//! panel cycling and quit.

use crate::app::{App, ScreenRole, ShownImage};
use crate::pipelines::photo::CaptureDevices;
use crate::storage;
use tracing::{debug, error, info};

impl App {
    // =========================================================================
    // Viewfinder
    // =========================================================================

    /// Open the settings panel used last
    pub(crate) fn on_gear(&mut self) {
        self.screens
            .set_current(ScreenRole::Settings(self.last_settings));
    }

    /// Open playback on the last capture, else on the newest stored image
    pub(crate) fn on_play(&mut self) {
        if let Some(retained) = self.retained.clone() {
            debug!(number = retained.number, "Playback of retained capture");
            self.playback = Some(retained);
            self.screens.set_current(ScreenRole::Playback);
            return;
        }

        let dir = self.storage_target().path.clone();
        let newest = storage::image_range(&dir).map(|(_, max)| max);
        if !newest.is_some_and(|n| self.show_image(&dir, n)) {
            self.screens.set_current(ScreenRole::NoImages);
        }
    }

    pub(crate) fn on_shutter(&mut self) {
        let target = self.storage_target().clone();
        let size = self.settings.size_preset();
        let art = self.busy_art(ScreenRole::Viewfinder);
        let devices = CaptureDevices {
            camera: self.camera.as_mut(),
            surface: &self.surface,
            uploader: self.uploader.as_ref(),
        };

        match self.capture.take_picture(&target, size, art, devices) {
            Ok(outcome) => {
                if let Some(image) = outcome.preview {
                    self.retained = Some(ShownImage {
                        dir: target.path.clone(),
                        number: outcome.number,
                        image,
                    });
                }
            }
            Err(e) => error!(storage = %target.name, error = %e, "Picture not taken"),
        }
    }

    // =========================================================================
    // Shared navigation
    // =========================================================================

    /// Back to the viewfinder; leaving a settings panel remembers it and saves
    pub(crate) fn on_done(&mut self) {
        if let ScreenRole::Settings(panel) = self.current_role() {
            self.last_settings = panel;
            self.settings.save(&self.config.settings_path);
        }
        self.screens.set_current(ScreenRole::Viewfinder);
    }

    pub(crate) fn on_cycle_settings(&mut self, delta: i32) {
        self.screens.cycle_settings(delta);
    }

    /// Save and stop the event loop
    pub(crate) fn on_quit(&mut self) {
        self.settings.save(&self.config.settings_path);
        info!("Quit requested");
        self.request_exit();
    }
}
