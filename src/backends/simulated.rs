// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera device
//!
//! Renders a moving test scene instead of reading a sensor, so the whole
//! controller can run on a development machine or in a terminal. Effects and
//! ISO are applied in software and are only approximations of what the
//! real camera firmware does.

use super::{Camera, CaptureFormat, CropRect, RawFormat, Resolution};
use crate::constants::EFFECTS;
use crate::errors::{BackendError, BackendResult};
use crate::media::yuv::rgb_to_yuv;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

/// JPEG quality used for stills
const STILL_QUALITY: u8 = 92;

/// Camera that renders a synthetic scene
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    resolution: Resolution,
    crop: CropRect,
    effect: String,
    iso: u32,
    frame: u64,
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self {
            resolution: Resolution::new(320, 240),
            crop: CropRect::FULL,
            effect: "none".to_string(),
            iso: 0,
            frame: 0,
        }
    }

    /// Current output mode
    pub fn mode(&self) -> (Resolution, CropRect) {
        (self.resolution, self.crop)
    }

    pub fn effect(&self) -> &str {
        &self.effect
    }

    pub fn iso(&self) -> u32 {
        self.iso
    }

    /// Render the scene at the current mode
    fn render(&self) -> RgbImage {
        let Resolution { width, height } = self.resolution;
        let phase = (self.frame % 120) as f32 / 120.0;
        let gain = iso_gain(self.iso);

        RgbImage::from_fn(width, height, |x, y| {
            // Map the output pixel into sensor coordinates through the crop
            let u = self.crop.x + self.crop.width * (x as f32 + 0.5) / width as f32;
            let v = self.crop.y + self.crop.height * (y as f32 + 0.5) / height as f32;

            let mut rgb = scene(u, v, phase);
            for c in rgb.iter_mut() {
                *c = (*c * gain).clamp(0.0, 1.0);
            }
            apply_effect(&mut rgb, &self.effect, x, y);
            Rgb(rgb.map(|c| (c * 255.0).round() as u8))
        })
    }
}

impl Camera for SimulatedCamera {
    fn set_mode(&mut self, resolution: Resolution, crop: CropRect) -> BackendResult<()> {
        if resolution.width == 0 || resolution.height == 0 {
            return Err(BackendError::Unsupported(format!(
                "resolution {}",
                resolution
            )));
        }
        debug!(%resolution, ?crop, "Simulated camera mode");
        self.resolution = resolution;
        self.crop = crop;
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path, format: CaptureFormat) -> BackendResult<()> {
        let CaptureFormat::Jpeg = format;
        let image = self.render();
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, STILL_QUALITY);
        encoder
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| BackendError::CaptureFailed(format!("JPEG encoding failed: {}", e)))?;
        info!(path = %path.display(), resolution = %self.resolution, "Simulated still written");
        Ok(())
    }

    fn capture_to_buffer(&mut self, format: RawFormat) -> BackendResult<Vec<u8>> {
        let RawFormat::Yuv420 = format;
        let rgb = self.render();
        self.frame = self.frame.wrapping_add(1);
        Ok(rgb_to_i420(&rgb))
    }

    fn set_effect(&mut self, effect: &str) -> BackendResult<()> {
        if !EFFECTS.contains(&effect) {
            return Err(BackendError::Unsupported(format!("effect {}", effect)));
        }
        self.effect = effect.to_string();
        Ok(())
    }

    fn set_iso(&mut self, iso: u32) -> BackendResult<()> {
        self.iso = iso;
        Ok(())
    }
}

/// Brightness multiplier for an ISO value; automatic behaves like ISO 200
fn iso_gain(iso: u32) -> f32 {
    let iso = if iso == 0 { 200 } else { iso };
    0.7 + iso as f32 / 1000.0
}

/// Test scene: sky gradient, ground, and a sun that drifts across
fn scene(u: f32, v: f32, phase: f32) -> [f32; 3] {
    let sun_x = 0.1 + 0.8 * phase;
    let dist = ((u - sun_x).powi(2) + (v - 0.3).powi(2)).sqrt();
    if dist < 0.08 {
        return [1.0, 0.85, 0.3];
    }
    if v < 0.6 {
        [0.35 + 0.3 * v, 0.55 + 0.3 * v, 0.95]
    } else {
        let stripe = if ((u * 12.0) as i32 + (v * 12.0) as i32) % 2 == 0 {
            0.05
        } else {
            0.0
        };
        [0.2 + stripe, 0.5 + stripe, 0.15]
    }
}

/// Software approximation of a camera effect on 0..1 RGB
fn apply_effect(rgb: &mut [f32; 3], effect: &str, x: u32, y: u32) {
    let luminance = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
    match effect {
        "negative" => rgb.iter_mut().for_each(|c| *c = 1.0 - *c),
        "solarize" => rgb.iter_mut().filter(|c| **c > 0.5).for_each(|c| *c = 1.0 - *c),
        "posterise" => rgb.iter_mut().for_each(|c| *c = (*c * 4.0).floor() / 4.0),
        "washedout" => rgb.iter_mut().for_each(|c| *c = *c * 0.6 + 0.35),
        "colorswap" => rgb.swap(0, 2),
        "sketch" | "gpen" | "hatch" => {
            let line = if (x + y) % 4 == 0 { 0.2 } else { 1.0 };
            *rgb = [luminance * line; 3];
        }
        "film" => {
            let grain = if (x * 7 + y * 13) % 5 == 0 { 0.06 } else { 0.0 };
            rgb.iter_mut().for_each(|c| *c = (*c + grain).min(1.0));
        }
        "pastel" | "watercolor" => {
            rgb.iter_mut().for_each(|c| *c = luminance + (*c - luminance) * 0.5 + 0.15);
        }
        "emboss" | "oilpaint" | "cartoon" => {
            rgb.iter_mut().for_each(|c| *c = ((*c - 0.5) * 1.6 + 0.5).clamp(0.0, 1.0));
        }
        _ => {}
    }
    rgb.iter_mut().for_each(|c| *c = c.clamp(0.0, 1.0));
}

/// Pack an RGB image as planar I420; chroma comes from each 2x2 block's top-left pixel
fn rgb_to_i420(rgb: &RgbImage) -> Vec<u8> {
    let (width, height) = rgb.dimensions();
    let mut out = Vec::with_capacity(RawFormat::Yuv420.frame_size(Resolution::new(width, height)));
    let mut u_plane = Vec::new();
    let mut v_plane = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let (l, u, v) = rgb_to_yuv(*rgb.get_pixel(x, y));
            out.push(l);
            if x % 2 == 0 && y % 2 == 0 {
                u_plane.push(u);
                v_plane.push(v);
            }
        }
    }

    out.extend(u_plane);
    out.extend(v_plane);
    out
}
