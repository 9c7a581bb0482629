// SPDX-License-Identifier: GPL-3.0-only

//! Device collaborator abstraction
//!
//! The controller never talks to hardware directly. Everything outside the
//! screen state machine and the capture coordinator sits behind one of these
//! traits:
//!
//! ```text
//! ┌──────────────────────┐
//! │  Event loop / App    │
//! └──────────┬───────────┘
//!            │
//!   ┌────────┼──────────┬─────────────┬────────────┐
//!   ▼        ▼          ▼             ▼            ▼
//! Camera   Surface   InputSource   Uploader   ColorConverter
//!   │        │          │             │        (crate::media)
//!   ▼        ▼          ▼             ▼
//! simulated terminal  terminal     shell
//! ```

pub mod framebuffer;
pub mod simulated;
pub mod terminal;
pub mod types;
pub mod uploader;

pub use framebuffer::Framebuffer;
pub use types::*;

use crate::errors::BackendResult;
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Camera device contract
///
/// The device must tolerate being reconfigured between every capture: the
/// capture coordinator switches to full resolution for each still and back to
/// the preview mode afterwards.
pub trait Camera {
    /// Set output resolution and normalized crop window
    fn set_mode(&mut self, resolution: Resolution, crop: CropRect) -> BackendResult<()>;

    /// Blocking still capture written to `path`
    fn capture_to_file(&mut self, path: &Path, format: CaptureFormat) -> BackendResult<()>;

    /// Grab one preview frame at the current resolution
    fn capture_to_buffer(&mut self, format: RawFormat) -> BackendResult<Vec<u8>>;

    /// Apply a named image effect (`"none"` disables effects)
    fn set_effect(&mut self, effect: &str) -> BackendResult<()>;

    /// Set sensor ISO; 0 selects automatic
    fn set_iso(&mut self, iso: u32) -> BackendResult<()>;
}

/// Display surface the UI draws into
///
/// Must be `Send`: the busy indicator thread draws on it while the primary
/// thread is blocked in a capture.
pub trait Surface: Send {
    /// Surface size in pixels
    fn size(&self) -> Resolution;

    /// Fill a rectangle with a solid color (clipped)
    fn fill(&mut self, rect: Rect, color: Rgb<u8>);

    /// Copy an opaque image with its top-left corner at `at` (clipped)
    fn blit(&mut self, image: &RgbImage, at: Point);

    /// Alpha-blend an image with its top-left corner at `at` (clipped)
    fn blit_rgba(&mut self, image: &RgbaImage, at: Point);

    /// Push the current contents to the physical display
    fn present(&mut self) -> BackendResult<()>;

    /// Fill the whole surface
    fn clear(&mut self, color: Rgb<u8>) {
        let size = self.size();
        self.fill(Rect::new(0, 0, size.width, size.height), color);
    }
}

/// Display surface shared between the primary thread and the busy indicator
pub type SharedSurface = Arc<Mutex<dyn Surface>>;

/// Lock the shared surface, recovering from a poisoned lock
///
/// A panic in the indicator thread must not take the display down with it.
pub fn lock_surface(surface: &SharedSurface) -> MutexGuard<'_, dyn Surface + 'static> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One event from the touch input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Finger down at a display position
    Tap(Point),
    /// The host asked the program to exit
    Quit,
}

/// Live touch input stream
pub trait InputSource {
    /// Next pending event, waiting at most `timeout` (zero never blocks)
    fn next_event(&mut self, timeout: Duration) -> BackendResult<Option<InputEvent>>;
}

/// Fire-and-forget hand-off of a captured file to a remote store
pub trait Uploader {
    /// Start uploading `path`; failures are logged, never reported
    fn upload(&self, path: &Path);
}
