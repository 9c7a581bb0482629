// SPDX-License-Identifier: GPL-3.0-only

//! Color conversion for viewfinder frames
//!
//! The camera hands out raw planar YUV 4:2:0 buffers for the viewfinder;
//! they must become RGB before they can be blitted to the display. The
//! conversion sits behind [`ColorConverter`] so a hardware-assisted path can
//! replace the CPU one without touching the event loop.

pub mod yuv;

pub use yuv::Yuv420Converter;

use image::RgbImage;

/// Raw frame to RGB conversion
pub trait ColorConverter: Send {
    /// Convert one `width` x `height` frame
    ///
    /// Fails when `raw` is too short for the given size.
    fn convert(&self, raw: &[u8], width: u32, height: u32) -> Result<RgbImage, String>;
}
