// SPDX-License-Identifier: GPL-3.0-only

//! Playback and delete confirmation

use crate::app::{App, ScreenRole, ShownImage};
use crate::pipelines::photo::preview;
use crate::storage;
use std::path::Path;
use tracing::{info, warn};

impl App {
    /// Load image `number` from `dir` and open playback on it
    ///
    /// Runs the busy indicator of the current screen while loading. Returns
    /// false, leaving the screen unchanged, if the file cannot be loaded.
    pub(crate) fn show_image(&mut self, dir: &Path, number: u16) -> bool {
        let path = storage::image_path(dir, number);
        let size = self.settings.size_preset().preview;
        let art = self.busy_art(self.current_role());

        let indicator = self.capture.start_indicator(&self.surface, art);
        let loaded = preview::load_scaled(&path, size);
        indicator.stop();

        match loaded {
            Ok(image) => {
                self.playback = Some(ShownImage {
                    dir: dir.to_path_buf(),
                    number,
                    image,
                });
                self.screens.set_current(ScreenRole::Playback);
                true
            }
            Err(e) => {
                warn!(error = %e, "Cannot show image");
                false
            }
        }
    }

    /// Step to the neighbouring image in the shown image's directory, wrapping
    pub(crate) fn on_image_step(&mut self, step: i32) {
        let Some((dir, current)) = self.playback.as_ref().map(|s| (s.dir.clone(), s.number))
        else {
            return;
        };
        match storage::next_existing(&dir, current, step) {
            Some(next) if next == current => {}
            Some(next) => {
                self.show_image(&dir, next);
            }
            None => {
                self.playback = None;
                self.screens.set_current(ScreenRole::NoImages);
            }
        }
    }

    pub(crate) fn on_trash(&mut self) {
        if self.playback.is_some() {
            self.screens.set_current(ScreenRole::DeleteConfirm);
        }
    }

    /// `confirm` is 1 for "yes", 0 for "no"
    pub(crate) fn on_delete(&mut self, confirm: i32) {
        if confirm == 0 {
            self.screens.set_current(ScreenRole::Playback);
            return;
        }

        let Some(shown) = self.playback.take() else {
            self.screens.set_current(ScreenRole::NoImages);
            return;
        };
        let path = shown.path();
        match std::fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "Image deleted"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete image"),
        }
        self.retained = None;

        let shown_previous = storage::next_existing(&shown.dir, shown.number, -1)
            .is_some_and(|previous| self.show_image(&shown.dir, previous));
        if !shown_previous {
            self.screens.set_current(ScreenRole::NoImages);
        }
    }
}
