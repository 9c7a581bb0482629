// SPDX-License-Identifier: GPL-3.0-only

//! Scaled previews of captured images

use crate::backends::{Rect, Resolution, Surface};
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

/// Load an image file and scale it to exactly `size`
pub fn load_scaled(path: &Path, size: Resolution) -> Result<RgbImage, String> {
    let image = image::open(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?
        .to_rgb8();
    debug!(
        path = %path.display(),
        from = %Resolution::new(image.width(), image.height()),
        to = %size,
        "Scaling preview"
    );
    if image.dimensions() == (size.width, size.height) {
        return Ok(image);
    }
    Ok(image::imageops::resize(
        &image,
        size.width,
        size.height,
        FilterType::Triangle,
    ))
}

/// Draw `image` centered on the surface
///
/// The surface is cleared to black first when the image does not cover it.
pub fn draw_letterboxed(surface: &mut dyn Surface, image: Option<&RgbImage>) {
    let screen = surface.size();
    let covers = image.is_some_and(|i| i.width() >= screen.width && i.height() >= screen.height);
    if !covers {
        surface.clear(Rgb([0, 0, 0]));
    }
    if let Some(image) = image {
        let full = Rect::new(0, 0, screen.width, screen.height);
        surface.blit(image, full.centered(image.width(), image.height()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::Framebuffer;

    #[test]
    fn test_letterbox_centers_short_images() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Rgb([50, 50, 50]));
        let image = RgbImage::from_pixel(8, 4, Rgb([200, 0, 0]));
        draw_letterboxed(&mut fb, Some(&image));
        assert_eq!(fb.image().get_pixel(0, 1), &Rgb([0, 0, 0]));
        assert_eq!(fb.image().get_pixel(0, 2), &Rgb([200, 0, 0]));
        assert_eq!(fb.image().get_pixel(7, 5), &Rgb([200, 0, 0]));
        assert_eq!(fb.image().get_pixel(7, 6), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_load_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_0001.JPG");
        RgbImage::from_pixel(64, 36, Rgb([10, 200, 10]))
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap();
        let scaled = load_scaled(&path, Resolution::new(32, 18)).unwrap();
        assert_eq!(scaled.dimensions(), (32, 18));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_scaled(Path::new("/nonexistent/IMG_0001.JPG"), Resolution::new(4, 4)).is_err());
    }
}
