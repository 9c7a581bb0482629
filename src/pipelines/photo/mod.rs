// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture coordinator
//!
//! Turns a shutter tap into a numbered, correctly owned file on the active
//! storage target:
//!
//! ```text
//! ensure directory ─▶ allocate IMG_NNNN ─▶ busy indicator on
//!                                              │
//!                     still mode ─▶ capture ─▶ preview mode (always)
//!                                              │
//!      chown/chmod ─▶ scaled preview ─▶ upload hand-off (on success)
//!                                              │
//!                 busy indicator off + join ─▶ show preview, dwell
//! ```
//!
//! Directory and allocation failures abort before anything else happens:
//! the camera is not touched and no indicator is started.

pub mod busy;
pub mod capture;
pub mod preview;

pub use busy::{BusyArt, BusyIndicator};
pub use capture::{PreviewModeGuard, capture_still};

use crate::backends::{Camera, SharedSurface, Uploader, lock_surface};
use crate::config::StorageTarget;
use crate::constants::SizePreset;
use crate::errors::{CaptureError, CaptureResult};
use crate::storage::{self, ImageCursor, Ownership};
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tracing::{error, info, warn};

/// Collaborators a capture needs, borrowed from the application context
pub struct CaptureDevices<'a> {
    pub camera: &'a mut dyn Camera,
    pub surface: &'a SharedSurface,
    pub uploader: &'a dyn Uploader,
}

/// Result of a successful capture
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub number: u16,
    pub path: PathBuf,
    /// Scaled preview; `None` when the written file could not be read back
    pub preview: Option<RgbImage>,
}

/// Owns the image cursor and the busy flag
pub struct CaptureCoordinator {
    cursor: ImageCursor,
    owner: Ownership,
    dwell: Duration,
    busy_interval: Duration,
    busy: Arc<AtomicBool>,
}

impl CaptureCoordinator {
    pub fn new(owner: Ownership, dwell: Duration, busy_interval: Duration) -> Self {
        Self {
            cursor: ImageCursor::new(),
            owner,
            dwell,
            busy_interval,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that is true while the indicator should be animating
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    pub fn busy_interval(&self) -> Duration {
        self.busy_interval
    }

    pub fn cursor(&self) -> &ImageCursor {
        &self.cursor
    }

    /// Start the busy indicator with this coordinator's flag and cadence
    pub fn start_indicator(&self, surface: &SharedSurface, art: BusyArt) -> BusyIndicator {
        BusyIndicator::start(
            self.busy_flag(),
            Arc::clone(surface),
            art,
            self.busy_interval,
        )
    }

    /// Take one picture into `target` at `size`
    pub fn take_picture(
        &mut self,
        target: &StorageTarget,
        size: &SizePreset,
        art: BusyArt,
        devices: CaptureDevices<'_>,
    ) -> CaptureResult<CaptureOutcome> {
        storage::ensure_directory(&target.path, self.owner)?;
        let (number, path) = self.cursor.allocate(target)?;

        let indicator = self.start_indicator(devices.surface, art);

        let captured = capture_still(devices.camera, size, &path);
        let preview = match &captured {
            Ok(()) => {
                storage::fix_file_ownership(&path, self.owner);
                let preview = match preview::load_scaled(&path, size.preview) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warn!(error = %e, "Captured file could not be loaded for preview");
                        None
                    }
                };
                if target.upload {
                    devices.uploader.upload(&path);
                }
                preview
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Capture failed");
                None
            }
        };

        indicator.stop();
        captured.map_err(CaptureError::Device)?;

        info!(path = %path.display(), number, "Picture taken");
        if let Some(image) = &preview {
            {
                let mut surface = lock_surface(devices.surface);
                preview::draw_letterboxed(&mut *surface, Some(image));
                if let Err(e) = surface.present() {
                    warn!(error = %e, "Failed to present capture preview");
                }
            }
            std::thread::sleep(self.dwell);
        }

        Ok(CaptureOutcome {
            number,
            path,
            preview,
        })
    }
}
