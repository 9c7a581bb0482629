// SPDX-License-Identifier: GPL-3.0-only

//! In-memory RGB framebuffer
//!
//! Used directly as a headless surface, and as the backing store of the
//! terminal display.

use super::{Point, Rect, Resolution, Surface};
use crate::errors::BackendResult;
use image::{Rgb, RgbImage, RgbaImage};

/// RGB framebuffer implementing [`Surface`]
#[derive(Debug, Clone)]
pub struct Framebuffer {
    image: RgbImage,
    presented: u64,
}

impl Framebuffer {
    /// Create a black framebuffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            presented: 0,
        }
    }

    /// Current pixel contents
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// How many times `present` was called
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Clip a rect at `at` of size w x h to the framebuffer; returns (x0, y0, x1, y1)
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(self.image.width() as i64);
        let y1 = (y as i64 + height as i64).min(self.image.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> Resolution {
        Resolution::new(self.image.width(), self.image.height())
    }

    fn fill(&mut self, rect: Rect, color: Rgb<u8>) {
        let Some((x0, y0, x1, y1)) = self.clip(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    fn blit(&mut self, image: &RgbImage, at: Point) {
        let Some((x0, y0, x1, y1)) = self.clip(at.x, at.y, image.width(), image.height()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let src_x = (x as i64 - at.x as i64) as u32;
                let src_y = (y as i64 - at.y as i64) as u32;
                self.image.put_pixel(x, y, *image.get_pixel(src_x, src_y));
            }
        }
    }

    fn blit_rgba(&mut self, image: &RgbaImage, at: Point) {
        let Some((x0, y0, x1, y1)) = self.clip(at.x, at.y, image.width(), image.height()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let src_x = (x as i64 - at.x as i64) as u32;
                let src_y = (y as i64 - at.y as i64) as u32;
                let [r, g, b, a] = image.get_pixel(src_x, src_y).0;
                if a == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(x, y);
                let alpha = a as u16;
                for (channel, src) in dst.0.iter_mut().zip([r, g, b]) {
                    *channel = ((src as u16 * alpha + *channel as u16 * (255 - alpha)) / 255) as u8;
                }
            }
        }
    }

    fn present(&mut self) -> BackendResult<()> {
        self.presented += 1;
        Ok(())
    }
}
