// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles shared by the integration tests

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use touchcam::backends::{
    Camera, CaptureFormat, CropRect, Framebuffer, InputEvent, InputSource, Point, RawFormat, Rect,
    Resolution, SharedSurface, Surface, Uploader,
};
use touchcam::config::StorageTarget;
use touchcam::errors::{BackendError, BackendResult};

/// One call made on [`FakeCamera`]
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    SetMode(Resolution, CropRect),
    CaptureToFile { path: PathBuf, busy: bool },
    CaptureToBuffer,
    SetEffect(String),
    SetIso(u32),
}

/// Camera that logs every call and writes a small JPEG on capture
#[derive(Default)]
pub struct FakeCamera {
    pub calls: Arc<Mutex<Vec<CameraCall>>>,
    pub fail_capture: bool,
    pub fail_still_mode: bool,
    /// Sampled on every capture to check the indicator is raised
    pub busy: Option<Arc<AtomicBool>>,
    pub resolution: Option<Resolution>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CameraCall> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: CameraCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Camera for FakeCamera {
    fn set_mode(&mut self, resolution: Resolution, crop: CropRect) -> BackendResult<()> {
        self.log(CameraCall::SetMode(resolution, crop));
        if self.fail_still_mode && resolution.width > 1000 {
            return Err(BackendError::Unsupported("still mode".to_string()));
        }
        self.resolution = Some(resolution);
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path, _format: CaptureFormat) -> BackendResult<()> {
        let busy = self
            .busy
            .as_ref()
            .is_some_and(|b| b.load(Ordering::SeqCst));
        self.log(CameraCall::CaptureToFile {
            path: path.to_path_buf(),
            busy,
        });
        // Give the indicator thread time to draw at least once more
        std::thread::sleep(Duration::from_millis(20));
        if self.fail_capture {
            return Err(BackendError::CaptureFailed("sensor timeout".to_string()));
        }
        RgbImage::from_pixel(64, 48, Rgb([200, 120, 40]))
            .save_with_format(path, ImageFormat::Jpeg)
            .map_err(|e| BackendError::IoError(e.to_string()))
    }

    fn capture_to_buffer(&mut self, format: RawFormat) -> BackendResult<Vec<u8>> {
        self.log(CameraCall::CaptureToBuffer);
        let resolution = self.resolution.unwrap_or(Resolution::new(320, 240));
        Ok(vec![128; format.frame_size(resolution)])
    }

    fn set_effect(&mut self, effect: &str) -> BackendResult<()> {
        self.log(CameraCall::SetEffect(effect.to_string()));
        Ok(())
    }

    fn set_iso(&mut self, iso: u32) -> BackendResult<()> {
        self.log(CameraCall::SetIso(iso));
        Ok(())
    }
}

/// Surface that remembers which thread presented each frame
pub struct RecordingSurface {
    pub framebuffer: Framebuffer,
    /// One entry per present: true when it came from the busy indicator
    pub presents: Arc<Mutex<Vec<bool>>>,
}

impl RecordingSurface {
    /// Surface plus a handle on its present log
    pub fn shared(width: u32, height: u32) -> (SharedSurface, Arc<Mutex<Vec<bool>>>) {
        let presents = Arc::new(Mutex::new(Vec::new()));
        let surface = RecordingSurface {
            framebuffer: Framebuffer::new(width, height),
            presents: Arc::clone(&presents),
        };
        (Arc::new(Mutex::new(surface)), presents)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Resolution {
        self.framebuffer.size()
    }

    fn fill(&mut self, rect: Rect, color: Rgb<u8>) {
        self.framebuffer.fill(rect, color);
    }

    fn blit(&mut self, image: &RgbImage, at: Point) {
        self.framebuffer.blit(image, at);
    }

    fn blit_rgba(&mut self, image: &RgbaImage, at: Point) {
        self.framebuffer.blit_rgba(image, at);
    }

    fn present(&mut self) -> BackendResult<()> {
        let from_indicator = std::thread::current().name() == Some("busy-indicator");
        self.presents.lock().unwrap().push(from_indicator);
        Ok(())
    }
}

/// Uploader that only remembers what it was given
#[derive(Default, Clone)]
pub struct RecordingUploader {
    pub uploaded: Arc<Mutex<Vec<PathBuf>>>,
}

impl Uploader for RecordingUploader {
    fn upload(&self, path: &Path) {
        self.uploaded.lock().unwrap().push(path.to_path_buf());
    }
}

/// Input that replays a fixed script, then reports quit
///
/// `None` entries are polls that find nothing pending.
pub struct ScriptedInput {
    events: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = Option<InputEvent>>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self, _timeout: Duration) -> BackendResult<Option<InputEvent>> {
        Ok(self.events.pop_front().unwrap_or(Some(InputEvent::Quit)))
    }
}

pub fn target(name: &str, path: &Path, upload: bool) -> StorageTarget {
    StorageTarget {
        name: name.to_string(),
        path: path.to_path_buf(),
        icon: format!("store-{}", name),
        upload,
    }
}

/// Create empty `IMG_NNNN.JPG` files
pub fn touch_images(dir: &Path, numbers: impl IntoIterator<Item = u16>) {
    for n in numbers {
        std::fs::write(dir.join(format!("IMG_{:04}.JPG", n)), b"").unwrap();
    }
}

/// Create decodable `IMG_NNNN.JPG` files
pub fn write_images(dir: &Path, numbers: impl IntoIterator<Item = u16>) {
    for n in numbers {
        RgbImage::from_pixel(32, 24, Rgb([n as u8, 0, 0]))
            .save_with_format(dir.join(format!("IMG_{:04}.JPG", n)), ImageFormat::Jpeg)
            .unwrap();
    }
}

pub fn tap(x: i32, y: i32) -> InputEvent {
    InputEvent::Tap(Point::new(x, y))
}
