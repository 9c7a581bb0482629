// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Running the touch UI in a terminal
//! - Taking a single picture without the UI
//! - Printing the effective settings

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use touchcam::app::{App, Devices, IconRegistry, event_loop};
use touchcam::backends::simulated::SimulatedCamera;
use touchcam::backends::terminal::{TerminalInput, TerminalSession, TerminalSurface};
use touchcam::backends::uploader::{NoUploader, ShellUploader};
use touchcam::backends::{Camera, CropRect, Framebuffer, SharedSurface, Uploader};
use touchcam::config::Config;
use touchcam::constants::SCREEN_SIZE;
use touchcam::media::Yuv420Converter;
use touchcam::pipelines::photo::{BusyArt, CaptureCoordinator, CaptureDevices};
use touchcam::settings::Settings;
use touchcam::storage::Ownership;

/// Load the configuration file if one was given and apply command-line overrides
pub fn load_config(
    path: Option<&Path>,
    icons: Option<PathBuf>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(icons) = icons {
        config.icons_dir = icons;
    }
    Ok(config)
}

fn uploader_for(config: &Config) -> Box<dyn Uploader> {
    match &config.uploader {
        Some(uploader) => Box::new(ShellUploader::new(uploader.clone())),
        None => Box::new(NoUploader),
    }
}

/// Run the touch UI until quit is tapped, `q` is pressed or SIGINT arrives
pub fn run_ui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let quit = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&quit);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    let settings = Settings::load(&config.settings_path, config.storage_targets.len());
    let icons = Arc::new(IconRegistry::load_dir(&config.icons_dir));
    let screen = SCREEN_SIZE;

    // Restores the terminal on every exit path, including errors below
    let _session = TerminalSession::enter()?;
    let surface: SharedSurface = Arc::new(Mutex::new(TerminalSurface::new(screen)?));
    let mut input = TerminalInput::new(screen);

    let devices = Devices {
        camera: Box::new(SimulatedCamera::new()),
        converter: Box::new(Yuv420Converter),
        surface,
        uploader: uploader_for(&config),
    };
    let mut app = App::new(config, settings, icons, devices)?;
    event_loop::run(&mut app, &mut input, &quit)?;
    Ok(())
}

/// Take one picture with the saved settings and print where it went
pub fn capture_once(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let settings = Settings::load(&config.settings_path, config.storage_targets.len());
    let target = &config.storage_targets[settings.storage];
    let size = settings.size_preset();

    let mut camera = SimulatedCamera::new();
    camera.set_effect(settings.effect_name())?;
    camera.set_iso(settings.iso_step().value)?;
    camera.set_mode(size.preview, CropRect::FULL)?;

    let screen = SCREEN_SIZE;
    let surface: SharedSurface = Arc::new(Mutex::new(Framebuffer::new(screen.width, screen.height)));
    let uploader = uploader_for(&config);
    let mut coordinator = CaptureCoordinator::new(
        Ownership::from_env(),
        Duration::ZERO,
        config.busy_frame_interval(),
    );

    let devices = CaptureDevices {
        camera: &mut camera,
        surface: &surface,
        uploader: uploader.as_ref(),
    };
    let art = BusyArt::none(Arc::new(IconRegistry::new()));
    let outcome = coordinator.take_picture(target, size, art, devices)?;

    println!("Photo saved: {}", outcome.path.display());
    Ok(())
}

/// Print the settings the UI would start with
pub fn print_settings(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let settings = Settings::load(&config.settings_path, config.storage_targets.len());
    let size = settings.size_preset();

    println!("Settings file: {}", config.settings_path.display());
    println!("  Effect:  {}", settings.effect_name());
    println!("  ISO:     {}", settings.iso_step().value);
    println!("  Size:    {} ({} capture)", size.name, size.full);
    println!(
        "  Storage: {} ({})",
        config.storage_targets[settings.storage].name,
        config.storage_targets[settings.storage].path.display()
    );
    println!();
    println!("{}", settings.to_json());
    Ok(())
}
