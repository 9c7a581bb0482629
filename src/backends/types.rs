// SPDX-License-Identifier: GPL-3.0-only

//! Geometry and format types shared by the UI and the device collaborators

use std::fmt;

/// A tap position in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Point) -> bool {
        let px = point.x as i64;
        let py = point.y as i64;
        let x = self.x as i64;
        let y = self.y as i64;
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }

    /// Top-left position that centers a `width` x `height` box inside this rect
    pub fn centered(&self, width: u32, height: u32) -> Point {
        Point::new(
            self.x + (self.width as i32 - width as i32) / 2,
            self.y + (self.height as i32 - height as i32) / 2,
        )
    }

    /// Same size, moved so the left edge sits at `x`
    pub fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }
}

/// Sensor or display resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels
    pub fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Largest size with this aspect ratio that fits inside `bounds`
    pub fn fit_within(&self, bounds: Resolution) -> Resolution {
        if self.width == 0 || self.height == 0 {
            return Resolution::new(0, 0);
        }
        let scale_w = bounds.width as f64 / self.width as f64;
        let scale_h = bounds.height as f64 / self.height as f64;
        let scale = scale_w.min(scale_h);
        Resolution::new(
            ((self.width as f64 * scale).round() as u32).clamp(1, bounds.width.max(1)),
            ((self.height as f64 * scale).round() as u32).clamp(1, bounds.height.max(1)),
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Normalized crop window (0.0..=1.0 on both axes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    /// The whole sensor
    pub const FULL: CropRect = CropRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Format written by `Camera::capture_to_file`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    Jpeg,
}

/// Format returned by `Camera::capture_to_buffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    /// Planar 4:2:0 (I420): full Y plane, then quarter-size U and V planes
    Yuv420,
}

impl RawFormat {
    /// Buffer size in bytes for a frame of the given resolution
    pub fn frame_size(&self, resolution: Resolution) -> usize {
        match self {
            RawFormat::Yuv420 => {
                let chroma_w = resolution.width.div_ceil(2) as usize;
                let chroma_h = resolution.height.div_ceil(2) as usize;
                resolution.pixels() + 2 * chroma_w * chroma_h
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10, 20, 30, 40);
        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(39, 59)));
        assert!(!rect.contains(Point::new(40, 30)));
        assert!(!rect.contains(Point::new(20, 60)));
        assert!(!rect.contains(Point::new(9, 30)));
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::new(0, 188, 320, 52);
        assert_eq!(rect.centered(20, 12), Point::new(150, 208));
    }

    #[test]
    fn test_fit_within_letterboxes_wide_images() {
        let image = Resolution::new(1920, 1080);
        assert_eq!(image.fit_within(Resolution::new(320, 240)), Resolution::new(320, 180));
    }

    #[test]
    fn test_yuv420_frame_size() {
        assert_eq!(RawFormat::Yuv420.frame_size(Resolution::new(320, 240)), 115_200);
        assert_eq!(RawFormat::Yuv420.frame_size(Resolution::new(3, 3)), 9 + 2 * 4);
    }
}
