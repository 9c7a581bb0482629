// SPDX-License-Identifier: GPL-3.0-only

//! CPU conversion of planar YUV 4:2:0 (I420) to RGB

use super::ColorConverter;
use crate::backends::{RawFormat, Resolution};
use image::{Rgb, RgbImage};
use tracing::trace;

/// Converts I420 frames using BT.601 coefficients
#[derive(Debug, Clone, Copy, Default)]
pub struct Yuv420Converter;

impl Yuv420Converter {
    pub fn new() -> Self {
        Self
    }
}

impl ColorConverter for Yuv420Converter {
    fn convert(&self, raw: &[u8], width: u32, height: u32) -> Result<RgbImage, String> {
        let expected = RawFormat::Yuv420.frame_size(Resolution::new(width, height));
        if raw.len() < expected {
            return Err(format!(
                "YUV420 buffer too short for {}x{}: {} < {}",
                width,
                height,
                raw.len(),
                expected
            ));
        }

        let chroma_w = width.div_ceil(2) as usize;
        let chroma_h = height.div_ceil(2) as usize;
        let y_size = width as usize * height as usize;
        let (luma, chroma) = raw.split_at(y_size);
        let (u_plane, v_plane) = chroma.split_at(chroma_w * chroma_h);

        let mut rgb = RgbImage::new(width, height);
        for (x, y, pixel) in rgb.enumerate_pixels_mut() {
            let l = luma[y as usize * width as usize + x as usize];
            let c = (y / 2) as usize * chroma_w + (x / 2) as usize;
            *pixel = yuv_to_rgb(l, u_plane[c], v_plane[c]);
        }

        trace!(width, height, "Converted YUV420 frame");
        Ok(rgb)
    }
}

/// Convert YUV (BT.601, full range) to RGB
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> Rgb<u8> {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344136 * u - 0.714136 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

    Rgb([r, g, b])
}

/// Convert RGB to YUV (BT.601, full range)
pub fn rgb_to_yuv(rgb: Rgb<u8>) -> (u8, u8, u8) {
    let [r, g, b] = rgb.0.map(|c| c as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let v = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;
    (
        y.round().clamp(0.0, 255.0) as u8,
        u.round().clamp(0.0, 255.0) as u8,
        v.round().clamp(0.0, 255.0) as u8,
    )
}
