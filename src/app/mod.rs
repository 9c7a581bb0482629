// SPDX-License-Identifier: GPL-3.0-only

//! Camera controller application
//!
//! # Architecture
//!
//! - `icons`: named bitmaps loaded from the icon directory
//! - `button`: tappable regions, commands and button visuals
//! - `screen`: screens, the screen table and tap dispatch
//! - `layout`: the concrete screens and their buttons
//! - `handlers`: what each button does
//! - `event_loop`: live and modal dispatch loops
//!
//! [`App`] is the single mutable context. The event loop owns it and every
//! button command receives it as `&mut App`.

pub mod button;
pub mod event_loop;
mod handlers;
pub mod icons;
pub mod layout;
pub mod screen;

pub use button::{Button, ButtonFace, Command};
pub use icons::{Icon, IconRegistry};
pub use screen::{DispatchMode, Screen, ScreenHost, ScreenRole, ScreenTable, SettingsPanel};

use crate::backends::{
    Camera, CropRect, Point, RawFormat, SharedSurface, Uploader, lock_surface,
};
use crate::config::{Config, StorageTarget};
use crate::errors::AppResult;
use crate::media::ColorConverter;
use crate::pipelines::photo::{BusyArt, CaptureCoordinator, preview};
use crate::settings::Settings;
use crate::storage::Ownership;
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External collaborators handed to the application
pub struct Devices {
    pub camera: Box<dyn Camera>,
    pub converter: Box<dyn ColorConverter>,
    pub surface: SharedSurface,
    pub uploader: Box<dyn Uploader>,
}

/// An image loaded for display
#[derive(Debug, Clone)]
pub struct ShownImage {
    /// Directory the file lives in, which may no longer be the active target
    pub dir: PathBuf,
    pub number: u16,
    pub image: RgbImage,
}

impl ShownImage {
    pub fn path(&self) -> PathBuf {
        crate::storage::image_path(&self.dir, self.number)
    }
}

/// Application context
pub struct App {
    screens: ScreenTable<App>,
    icons: Arc<IconRegistry>,
    config: Config,
    settings: Settings,
    camera: Box<dyn Camera>,
    converter: Box<dyn ColorConverter>,
    surface: SharedSurface,
    uploader: Box<dyn Uploader>,
    capture: CaptureCoordinator,
    /// Panel the gear button returns to
    last_settings: SettingsPanel,
    /// Image on the playback and delete screens
    playback: Option<ShownImage>,
    /// Preview of the most recent capture
    retained: Option<ShownImage>,
    /// Latest viewfinder frame; backdrop of the settings panels
    backdrop: Option<RgbImage>,
    exit_requested: bool,
}

impl ScreenHost for App {
    fn screens(&self) -> &ScreenTable<Self> {
        &self.screens
    }
}

impl App {
    /// Build the screens and bring controls and camera in line with `settings`
    pub fn new(
        config: Config,
        settings: Settings,
        icons: Arc<IconRegistry>,
        devices: Devices,
    ) -> AppResult<Self> {
        config.validate()?;
        let screens = layout::build(&icons, &config.storage_targets)?;
        let capture = CaptureCoordinator::new(
            Ownership::from_env(),
            config.preview_dwell(),
            config.busy_frame_interval(),
        );

        let mut app = Self {
            screens,
            icons,
            config,
            settings,
            camera: devices.camera,
            converter: devices.converter,
            surface: devices.surface,
            uploader: devices.uploader,
            capture,
            last_settings: SettingsPanel::Storage,
            playback: None,
            retained: None,
            backdrop: None,
            exit_requested: false,
        };
        app.sync_controls();
        info!(screens = app.screens.len(), ?settings, "Application ready");
        Ok(app)
    }

    pub fn screens(&self) -> &ScreenTable<App> {
        &self.screens
    }

    pub fn current_role(&self) -> ScreenRole {
        self.screens.current_role()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn last_settings_panel(&self) -> SettingsPanel {
        self.last_settings
    }

    /// Image currently shown in playback
    pub fn playback(&self) -> Option<&ShownImage> {
        self.playback.as_ref()
    }

    /// Preview kept from the most recent capture
    pub fn retained(&self) -> Option<&ShownImage> {
        self.retained.as_ref()
    }

    pub fn capture(&self) -> &CaptureCoordinator {
        &self.capture
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Dispatch a tap on the current screen; returns whether a button was hit
    pub fn tap(&mut self, point: Point) -> bool {
        screen::dispatch_tap(self, point)
    }

    pub fn storage_target(&self) -> &StorageTarget {
        let targets = &self.config.storage_targets;
        &targets[self.settings.storage.min(targets.len() - 1)]
    }

    fn button_face_mut(&mut self, role: ScreenRole, index: usize) -> Option<&mut ButtonFace> {
        self.screens
            .screen_mut(role)
            .and_then(|s| s.button_mut(index))
            .map(Button::face_mut)
    }

    fn set_button_background(&mut self, role: ScreenRole, index: usize, name: Option<&str>) {
        let icons = Arc::clone(&self.icons);
        if let Some(face) = self.button_face_mut(role, index) {
            face.set_background(&icons, name);
        }
    }

    /// Mark `selected` in a run of `count` radio buttons starting at `first`
    fn select_radio(&mut self, role: ScreenRole, first: usize, count: usize, selected: usize) {
        for i in 0..count {
            let name = if i == selected {
                layout::RADIO_ON
            } else {
                layout::RADIO_OFF
            };
            self.set_button_background(role, first + i, Some(name));
        }
    }

    /// Busy label and spinner of `role`, cloned for the indicator thread
    fn busy_art(&self, role: ScreenRole) -> BusyArt {
        let face = |index: usize| {
            self.screens
                .screen(role)
                .and_then(|s| s.button(index))
                .map(|b| b.face().clone())
        };
        match layout::busy_slots(role) {
            Some((label, spinner)) => BusyArt {
                label: face(label),
                spinner: face(spinner),
                icons: Arc::clone(&self.icons),
            },
            None => BusyArt::none(Arc::clone(&self.icons)),
        }
    }

    /// Reflect the loaded settings in every indicator and in the camera
    pub fn sync_controls(&mut self) {
        let targets = self.config.storage_targets.len();
        self.select_radio(
            ScreenRole::Settings(SettingsPanel::Storage),
            layout::FIRST_RADIO,
            targets,
            self.settings.storage,
        );
        self.select_radio(
            ScreenRole::Settings(SettingsPanel::Size),
            layout::FIRST_RADIO,
            crate::constants::SIZE_PRESETS.len(),
            self.settings.size,
        );
        self.apply_effect();
        self.apply_iso();
        self.apply_preview_mode();
    }

    fn apply_effect(&mut self) {
        let name = self.settings.effect_name();
        let label = format!("fx-{}", name);
        self.set_button_background(
            ScreenRole::Settings(SettingsPanel::Effect),
            layout::EFFECT_LABEL,
            Some(&label),
        );
        if let Err(e) = self.camera.set_effect(name) {
            warn!(effect = name, error = %e, "Camera rejected effect");
        }
    }

    fn apply_iso(&mut self) {
        let step = self.settings.iso_step();
        let role = ScreenRole::Settings(SettingsPanel::Iso);
        let label = format!("iso-{}", step.value);
        self.set_button_background(role, layout::ISO_LABEL, Some(&label));
        if let Some(marker) = self.button_face_mut(role, layout::ISO_MARKER) {
            marker.move_to_x(step.marker_x - crate::constants::ui::ISO_MARKER_TIP);
        }
        if let Err(e) = self.camera.set_iso(step.value) {
            warn!(iso = step.value, error = %e, "Camera rejected ISO");
        }
    }

    fn apply_preview_mode(&mut self) {
        let preview = self.settings.size_preset().preview;
        if let Err(e) = self.camera.set_mode(preview, CropRect::FULL) {
            warn!(resolution = %preview, error = %e, "Camera rejected preview mode");
        }
    }

    /// Capture, convert and show one viewfinder frame, then draw the buttons
    pub fn render_live_frame(&mut self) -> AppResult<()> {
        let preview = self.settings.size_preset().preview;
        let frame = self
            .camera
            .capture_to_buffer(RawFormat::Yuv420)
            .map_err(|e| e.to_string())
            .and_then(|raw| self.converter.convert(&raw, preview.width, preview.height));

        match frame {
            Ok(image) => self.backdrop = Some(image),
            Err(e) => {
                warn!(error = %e, "Viewfinder frame unavailable");
                self.backdrop = None;
            }
        }

        let mut surface = lock_surface(&self.surface);
        preview::draw_letterboxed(&mut *surface, self.backdrop.as_ref());
        self.screens.current().draw(&mut *surface);
        surface.present()?;
        Ok(())
    }

    /// Draw the current screen without touching the camera
    pub fn render_static(&self) -> AppResult<()> {
        let backdrop = match self.current_role() {
            ScreenRole::Playback | ScreenRole::DeleteConfirm => {
                self.playback.as_ref().map(|s| &s.image)
            }
            ScreenRole::NoImages => None,
            ScreenRole::Viewfinder | ScreenRole::Settings(_) => self.backdrop.as_ref(),
        };
        debug!(screen = %self.current_role(), "Static render");

        let mut surface = lock_surface(&self.surface);
        preview::draw_letterboxed(&mut *surface, backdrop);
        self.screens.current().draw(&mut *surface);
        surface.present()?;
        Ok(())
    }
}
