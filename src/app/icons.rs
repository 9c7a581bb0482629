// SPDX-License-Identifier: GPL-3.0-only

//! Icon registry
//!
//! Icons are `<name>.png` files in a single directory, loaded once at startup
//! and looked up by name. A file that fails to decode still registers its
//! name with no image, so buttons referencing it keep their geometry and
//! simply draw nothing.

use crate::backends::{Point, Rect, Surface};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A named image
#[derive(Debug, Clone)]
pub struct Icon {
    name: String,
    image: Option<Arc<RgbaImage>>,
}

impl Icon {
    pub fn new(name: impl Into<String>, image: Option<RgbaImage>) -> Self {
        Self {
            name: name.into(),
            image: image.map(Arc::new),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded pixels, if the file could be decoded
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_deref()
    }

    /// Draw centered in `bounds`; icons without pixels draw nothing
    pub fn draw_centered(&self, surface: &mut dyn Surface, bounds: Rect) {
        if let Some(image) = &self.image {
            let at: Point = bounds.centered(image.width(), image.height());
            surface.blit_rgba(image, at);
        }
    }
}

/// All icons, keyed by name
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: HashMap<String, Icon>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.png` in `dir`
    ///
    /// A missing or unreadable directory yields an empty registry.
    pub fn load_dir(dir: &Path) -> Self {
        let mut registry = Self::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Icon directory unavailable");
                return registry;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_png {
                continue;
            }

            let image = match image::open(&path) {
                Ok(image) => Some(image.to_rgba8()),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Icon failed to decode");
                    None
                }
            };
            debug!(name, "Loaded icon");
            registry.insert(Icon::new(name, image));
        }

        info!(dir = %dir.display(), count = registry.len(), "Icons loaded");
        registry
    }

    pub fn insert(&mut self, icon: Icon) {
        self.icons.insert(icon.name.clone(), icon);
    }

    pub fn get(&self, name: &str) -> Option<&Icon> {
        self.icons.get(name)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
