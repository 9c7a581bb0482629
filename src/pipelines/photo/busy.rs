// SPDX-License-Identifier: GPL-3.0-only

//! Busy indicator thread
//!
//! Runs only while the primary thread is blocked in a slow call (a still
//! capture or a playback image load). It shows the "working" label and
//! steps a spinner through `work-0`..`work-N` at a fixed cadence until the
//! shared busy flag drops.
//!
//! Contract with the primary thread:
//! 1. the flag is set true before the thread is spawned;
//! 2. the thread polls the flag after every frame and exits on false;
//! 3. [`BusyIndicator::stop`] clears the flag and joins, and the primary
//!    thread draws nothing until the join returns.

use crate::app::button::ButtonFace;
use crate::app::icons::IconRegistry;
use crate::backends::{SharedSurface, lock_surface};
use crate::constants::BUSY_FRAME_COUNT;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Visuals the indicator draws, copied out of the active screen
#[derive(Debug, Clone)]
pub struct BusyArt {
    /// Button whose background becomes the `working` label
    pub label: Option<ButtonFace>,
    /// Button whose background cycles through the spinner frames
    pub spinner: Option<ButtonFace>,
    pub icons: Arc<IconRegistry>,
}

impl BusyArt {
    /// Art that draws nothing; used when the screen has no busy slots
    pub fn none(icons: Arc<IconRegistry>) -> Self {
        Self {
            label: None,
            spinner: None,
            icons,
        }
    }
}

/// Handle to a running busy indicator
pub struct BusyIndicator {
    busy: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl BusyIndicator {
    /// Raise `busy` and start animating on `surface`
    ///
    /// If the thread cannot be spawned the flag is still raised and the
    /// capture proceeds without animation.
    pub fn start(
        busy: Arc<AtomicBool>,
        surface: SharedSurface,
        art: BusyArt,
        interval: Duration,
    ) -> Self {
        busy.store(true, Ordering::SeqCst);

        let flag = Arc::clone(&busy);
        let spawned = thread::Builder::new()
            .name("busy-indicator".to_string())
            .spawn(move || animate(&flag, &surface, art, interval));

        let thread_handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Failed to start busy indicator thread");
                None
            }
        };

        Self {
            busy,
            thread_handle,
        }
    }

    /// Whether the indicator thread is still alive
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Drop the busy flag and wait for the thread to finish drawing
    pub fn stop(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                warn!("Busy indicator thread panicked: {:?}", e);
            } else {
                debug!("Busy indicator stopped");
            }
        }
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        if self.thread_handle.is_some() || self.busy.load(Ordering::SeqCst) {
            self.stop_and_join();
        }
    }
}

fn animate(busy: &AtomicBool, surface: &SharedSurface, art: BusyArt, interval: Duration) {
    let BusyArt {
        mut label,
        mut spinner,
        icons,
    } = art;

    if let Some(face) = label.as_mut() {
        face.set_background(&icons, Some("working"));
    }

    debug!("Busy indicator running");
    let mut frame = 0usize;
    loop {
        {
            let mut surface = lock_surface(surface);
            if let Some(face) = &label {
                face.draw(&mut *surface);
            }
            if let Some(face) = spinner.as_mut() {
                let name = format!("work-{}", frame);
                face.set_background(&icons, Some(&name));
                face.draw(&mut *surface);
            }
            if let Err(e) = surface.present() {
                warn!(error = %e, "Busy indicator present failed");
            }
        }

        thread::sleep(interval);
        if !busy.load(Ordering::SeqCst) {
            break;
        }
        frame = (frame + 1) % BUSY_FRAME_COUNT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::icons::Icon;
    use crate::backends::{Framebuffer, Rect};
    use image::{Rgb, Rgba, RgbaImage};
    use std::sync::Mutex;

    fn art() -> BusyArt {
        let mut icons = IconRegistry::new();
        icons.insert(Icon::new(
            "working",
            Some(RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]))),
        ));
        for i in 0..BUSY_FRAME_COUNT {
            icons.insert(Icon::new(
                format!("work-{}", i),
                Some(RgbaImage::from_pixel(2, 2, Rgba([i as u8 * 40, 0, 0, 255]))),
            ));
        }
        BusyArt {
            label: Some(ButtonFace::new(Rect::new(0, 0, 4, 4))),
            spinner: Some(ButtonFace::new(Rect::new(4, 0, 2, 2))),
            icons: Arc::new(icons),
        }
    }

    #[test]
    fn test_stop_joins_and_clears_flag() {
        let busy = Arc::new(AtomicBool::new(false));
        let fb = Arc::new(Mutex::new(Framebuffer::new(8, 4)));
        let surface: SharedSurface = fb.clone();
        let indicator =
            BusyIndicator::start(Arc::clone(&busy), surface, art(), Duration::from_millis(5));
        assert!(busy.load(Ordering::SeqCst));
        thread::sleep(Duration::from_millis(30));
        indicator.stop();

        assert!(!busy.load(Ordering::SeqCst));
        let fb = fb.lock().unwrap();
        assert!(fb.presented() >= 1);
        assert_eq!(fb.image().get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_drop_stops_thread() {
        let busy = Arc::new(AtomicBool::new(false));
        let surface: SharedSurface = Arc::new(Mutex::new(Framebuffer::new(8, 4)));
        {
            let _indicator = BusyIndicator::start(
                Arc::clone(&busy),
                surface,
                BusyArt::none(Arc::new(IconRegistry::new())),
                Duration::from_millis(5),
            );
        }
        assert!(!busy.load(Ordering::SeqCst));
    }

    #[test]
    fn test_spinner_frames_advance() {
        let busy = Arc::new(AtomicBool::new(false));
        let fb = Arc::new(Mutex::new(Framebuffer::new(8, 4)));
        let surface: SharedSurface = fb.clone();
        let indicator =
            BusyIndicator::start(Arc::clone(&busy), surface, art(), Duration::from_millis(5));
        thread::sleep(Duration::from_millis(60));
        indicator.stop();
        let fb = fb.lock().unwrap();
        assert!(fb.presented() >= 2);
    }
}
