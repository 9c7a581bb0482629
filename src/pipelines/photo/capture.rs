// SPDX-License-Identifier: GPL-3.0-only

//! Still capture against the camera device
//!
//! The camera is switched to the still resolution for the duration of one
//! capture. [`PreviewModeGuard`] puts it back into the viewfinder mode when
//! dropped, so the switch-back runs exactly once whether the capture call
//! succeeds, fails, or the mode switch itself fails.

use crate::backends::{Camera, CaptureFormat, CropRect, Resolution};
use crate::constants::SizePreset;
use crate::errors::BackendResult;
use std::path::Path;
use tracing::{debug, info, warn};

/// Restores the viewfinder mode on drop
pub struct PreviewModeGuard<'a> {
    camera: &'a mut dyn Camera,
    preview: Resolution,
}

impl<'a> PreviewModeGuard<'a> {
    pub fn new(camera: &'a mut dyn Camera, preview: Resolution) -> Self {
        Self { camera, preview }
    }

    pub fn camera(&mut self) -> &mut dyn Camera {
        &mut *self.camera
    }
}

impl Drop for PreviewModeGuard<'_> {
    fn drop(&mut self) {
        debug!(resolution = %self.preview, "Restoring preview mode");
        if let Err(e) = self.camera.set_mode(self.preview, CropRect::FULL) {
            warn!(error = %e, "Failed to restore preview mode");
        }
    }
}

/// Switch to the still mode, capture to `path`, switch back
pub fn capture_still(camera: &mut dyn Camera, size: &SizePreset, path: &Path) -> BackendResult<()> {
    let mut guard = PreviewModeGuard::new(camera, size.preview);

    info!(resolution = %size.full, path = %path.display(), "Capturing still");
    guard.camera().set_mode(size.full, size.crop)?;
    guard.camera().capture_to_file(path, CaptureFormat::Jpeg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::RawFormat;
    use crate::constants::SIZE_PRESETS;
    use crate::errors::BackendError;

    #[derive(Default)]
    struct ModeLog {
        modes: Vec<(Resolution, CropRect)>,
        fail_capture: bool,
        fail_mode: bool,
    }

    impl Camera for ModeLog {
        fn set_mode(&mut self, resolution: Resolution, crop: CropRect) -> BackendResult<()> {
            self.modes.push((resolution, crop));
            if self.fail_mode && self.modes.len() == 1 {
                return Err(BackendError::Unsupported("mode".into()));
            }
            Ok(())
        }

        fn capture_to_file(&mut self, _path: &Path, _format: CaptureFormat) -> BackendResult<()> {
            if self.fail_capture {
                Err(BackendError::CaptureFailed("sensor timeout".into()))
            } else {
                Ok(())
            }
        }

        fn capture_to_buffer(&mut self, _format: RawFormat) -> BackendResult<Vec<u8>> {
            Ok(Vec::new())
        }

        fn set_effect(&mut self, _effect: &str) -> BackendResult<()> {
            Ok(())
        }

        fn set_iso(&mut self, _iso: u32) -> BackendResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_success_switches_and_restores() {
        let mut camera = ModeLog::default();
        let size = &SIZE_PRESETS[1];
        capture_still(&mut camera, size, Path::new("/tmp/x.jpg")).unwrap();
        assert_eq!(
            camera.modes,
            vec![(size.full, size.crop), (size.preview, CropRect::FULL)]
        );
    }

    #[test]
    fn test_failed_capture_restores_once() {
        let mut camera = ModeLog {
            fail_capture: true,
            ..Default::default()
        };
        let size = &SIZE_PRESETS[0];
        assert!(capture_still(&mut camera, size, Path::new("/tmp/x.jpg")).is_err());
        assert_eq!(camera.modes.len(), 2);
        assert_eq!(camera.modes[1], (size.preview, CropRect::FULL));
    }

    #[test]
    fn test_failed_mode_switch_still_restores() {
        let mut camera = ModeLog {
            fail_mode: true,
            ..Default::default()
        };
        let size = &SIZE_PRESETS[2];
        assert!(capture_still(&mut camera, size, Path::new("/tmp/x.jpg")).is_err());
        assert_eq!(camera.modes.last(), Some(&(size.preview, CropRect::FULL)));
        assert_eq!(camera.modes.len(), 2);
    }
}
