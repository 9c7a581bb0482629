// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for screen navigation, settings panels and playback

mod common;

use common::{CameraCall, FakeCamera, RecordingSurface, RecordingUploader, ScriptedInput, tap};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use touchcam::app::{App, Devices, Icon, IconRegistry, ScreenRole, SettingsPanel, event_loop, layout};
use touchcam::backends::{CropRect, Point};
use touchcam::config::Config;
use touchcam::constants::{EFFECTS, ISO_STEPS, SIZE_PRESETS, ui};
use touchcam::media::Yuv420Converter;
use touchcam::settings::Settings;

// Tap positions on the 320x240 layout
const GEAR: (i32, i32) = (10, 200);
const PLAY: (i32, i32) = (200, 200);
const SHUTTER: (i32, i32) = (160, 100);
const DONE: (i32, i32) = (160, 220);
const PREV: (i32, i32) = (10, 10);
const NEXT: (i32, i32) = (300, 10);
const TRASH: (i32, i32) = (160, 10);
const STEP_LEFT: (i32, i32) = (10, 90);
const STEP_RIGHT: (i32, i32) = (300, 90);
const RADIOS: [(i32, i32); 3] = [(50, 100), (160, 100), (270, 100)];
const QUIT_OK: (i32, i32) = (160, 100);
const DELETE_YES: (i32, i32) = (90, 130);
const DELETE_NO: (i32, i32) = (230, 130);

struct Rig {
    app: App,
    calls: Arc<Mutex<Vec<CameraCall>>>,
    dir: TempDir,
}

impl Rig {
    fn new(settings: Settings) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            settings_path: dir.path().join("settings.json"),
            storage_targets: vec![
                common::target("local", &dir.path().join("local"), false),
                common::target("boot", &dir.path().join("boot"), false),
                common::target("cloud", &dir.path().join("local"), true),
            ],
            preview_dwell_ms: 0,
            busy_frame_ms: 5,
            ..Config::default()
        };

        let camera = FakeCamera::new();
        let calls = Arc::clone(&camera.calls);
        let (surface, _) = RecordingSurface::shared(320, 240);
        let devices = Devices {
            camera: Box::new(camera),
            converter: Box::new(Yuv420Converter::new()),
            surface,
            uploader: Box::new(RecordingUploader::default()),
        };
        let app = App::new(config, settings, icons(), devices).unwrap();

        Self { app, calls, dir }
    }

    fn tap(&mut self, (x, y): (i32, i32)) -> bool {
        self.app.tap(Point::new(x, y))
    }

    fn role(&self) -> ScreenRole {
        self.app.current_role()
    }

    fn local_dir(&self) -> PathBuf {
        self.dir.path().join("local")
    }

    fn settings_path(&self) -> &Path {
        &self.app.config().settings_path
    }

    fn background(&self, role: ScreenRole, index: usize) -> Option<String> {
        self.app
            .screens()
            .screen(role)
            .and_then(|s| s.button(index))
            .and_then(|b| b.face().background_name().map(str::to_string))
    }

    fn calls(&self) -> Vec<CameraCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Every icon name the UI swaps at runtime, without pixels
fn icons() -> Arc<IconRegistry> {
    let mut icons = IconRegistry::new();
    let mut names: Vec<String> = vec![
        layout::RADIO_ON.to_string(),
        layout::RADIO_OFF.to_string(),
        "working".to_string(),
    ];
    names.extend((0..5).map(|i| format!("work-{}", i)));
    names.extend(EFFECTS.iter().map(|e| format!("fx-{}", e)));
    names.extend(ISO_STEPS.iter().map(|s| format!("iso-{}", s.value)));
    for name in names {
        icons.insert(Icon::new(name, None));
    }
    Arc::new(icons)
}

fn saved_record(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn radio_states(rig: &Rig, panel: SettingsPanel, count: usize) -> Vec<bool> {
    (0..count)
        .map(|i| {
            rig.background(ScreenRole::Settings(panel), layout::FIRST_RADIO + i)
                .as_deref()
                == Some(layout::RADIO_ON)
        })
        .collect()
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_startup_reflects_loaded_settings() {
    let rig = Rig::new(Settings {
        effect: 3,
        iso: 2,
        size: 1,
        storage: 2,
    });

    assert_eq!(rig.role(), ScreenRole::Viewfinder);
    assert_eq!(
        radio_states(&rig, SettingsPanel::Storage, 3),
        vec![false, false, true]
    );
    assert_eq!(
        radio_states(&rig, SettingsPanel::Size, SIZE_PRESETS.len()),
        vec![false, true, false]
    );
    assert_eq!(
        rig.background(ScreenRole::Settings(SettingsPanel::Effect), layout::EFFECT_LABEL),
        Some(format!("fx-{}", EFFECTS[3]))
    );
    assert_eq!(
        rig.background(ScreenRole::Settings(SettingsPanel::Iso), layout::ISO_LABEL),
        Some("iso-200".to_string())
    );

    let marker = rig
        .app
        .screens()
        .screen(ScreenRole::Settings(SettingsPanel::Iso))
        .and_then(|s| s.button(layout::ISO_MARKER))
        .unwrap()
        .face()
        .bounds();
    assert_eq!(marker.x, ISO_STEPS[2].marker_x - ui::ISO_MARKER_TIP);

    let calls = rig.calls();
    assert!(calls.contains(&CameraCall::SetEffect(EFFECTS[3].to_string())));
    assert!(calls.contains(&CameraCall::SetIso(200)));
    assert!(calls.contains(&CameraCall::SetMode(SIZE_PRESETS[1].preview, CropRect::FULL)));
}

// =============================================================================
// Settings navigation
// =============================================================================

#[test]
fn test_settings_panels_cycle_and_wrap() {
    let mut rig = Rig::new(Settings::default());

    assert!(rig.tap(GEAR));
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Storage));

    let mut seen = Vec::new();
    for _ in 0..SettingsPanel::ALL.len() {
        rig.tap(NEXT);
        seen.push(rig.role());
    }
    assert_eq!(
        seen,
        vec![
            ScreenRole::Settings(SettingsPanel::Size),
            ScreenRole::Settings(SettingsPanel::Effect),
            ScreenRole::Settings(SettingsPanel::Iso),
            ScreenRole::Settings(SettingsPanel::Quit),
            ScreenRole::Settings(SettingsPanel::Storage),
        ]
    );

    rig.tap(PREV);
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Quit));
}

#[test]
fn test_done_saves_and_gear_returns_to_last_panel() {
    let mut rig = Rig::new(Settings::default());

    rig.tap(GEAR);
    rig.tap(NEXT);
    rig.tap(RADIOS[2]);
    assert_eq!(rig.app.settings().size, 2);
    assert!(!rig.settings_path().exists(), "selection alone does not save");

    rig.tap(DONE);
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
    assert_eq!(rig.app.last_settings_panel(), SettingsPanel::Size);
    assert_eq!(saved_record(rig.settings_path())["size"], 2);

    rig.tap(GEAR);
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Size));
}

#[test]
fn test_radio_selection_is_exclusive() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);

    rig.tap(RADIOS[1]);
    assert_eq!(rig.app.settings().storage, 1);
    assert_eq!(
        radio_states(&rig, SettingsPanel::Storage, 3),
        vec![false, true, false]
    );

    rig.tap(RADIOS[0]);
    assert_eq!(rig.app.settings().storage, 0);
    assert_eq!(
        radio_states(&rig, SettingsPanel::Storage, 3),
        vec![true, false, false]
    );
}

#[test]
fn test_size_selection_switches_preview_mode() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);
    rig.tap(NEXT);
    rig.tap(RADIOS[1]);

    assert_eq!(
        rig.calls().last(),
        Some(&CameraCall::SetMode(SIZE_PRESETS[1].preview, CropRect::FULL))
    );
}

#[test]
fn test_effect_wraps_backwards() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);
    rig.tap(NEXT);
    rig.tap(NEXT);
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Effect));

    rig.tap(STEP_LEFT);
    let last = EFFECTS[EFFECTS.len() - 1];
    assert_eq!(rig.app.settings().effect, EFFECTS.len() - 1);
    assert_eq!(
        rig.background(ScreenRole::Settings(SettingsPanel::Effect), layout::EFFECT_LABEL),
        Some(format!("fx-{}", last))
    );
    assert_eq!(rig.calls().last(), Some(&CameraCall::SetEffect(last.to_string())));

    rig.tap(STEP_RIGHT);
    assert_eq!(rig.app.settings().effect, 0);
}

#[test]
fn test_iso_clamps_at_ends() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);
    rig.tap(PREV);
    rig.tap(PREV);
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Iso));

    let before = rig.calls().len();
    rig.tap(STEP_LEFT);
    assert_eq!(rig.app.settings().iso, 0);
    assert_eq!(rig.calls().len(), before, "no camera call at the bottom stop");

    rig.tap(STEP_RIGHT);
    assert_eq!(rig.app.settings().iso, 1);
    assert_eq!(rig.calls().last(), Some(&CameraCall::SetIso(ISO_STEPS[1].value)));

    for _ in 0..ISO_STEPS.len() + 2 {
        rig.tap(STEP_RIGHT);
    }
    assert_eq!(rig.app.settings().iso, ISO_STEPS.len() - 1);
}

#[test]
fn test_quit_saves_and_exits() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);
    rig.tap(RADIOS[1]);
    rig.tap(PREV);
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Quit));

    rig.tap(QUIT_OK);
    assert!(rig.app.should_exit());
    assert_eq!(saved_record(rig.settings_path())["store"], 1);
}

// =============================================================================
// Shutter and playback
// =============================================================================

#[test]
fn test_shutter_then_play_shows_capture() {
    let mut rig = Rig::new(Settings::default());

    assert!(rig.tap(SHUTTER));
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
    assert!(rig.local_dir().join("IMG_0001.JPG").is_file());
    assert_eq!(rig.app.retained().map(|r| r.number), Some(1));

    rig.tap(PLAY);
    assert_eq!(rig.role(), ScreenRole::Playback);
    assert_eq!(rig.app.playback().map(|p| p.number), Some(1));

    rig.tap(DONE);
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
}

#[test]
fn test_play_without_images() {
    let mut rig = Rig::new(Settings::default());

    rig.tap(PLAY);
    assert_eq!(rig.role(), ScreenRole::NoImages);

    // Anywhere on the screen leaves
    assert!(rig.tap((5, 5)));
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
}

#[test]
fn test_playback_steps_through_existing_images() {
    let mut rig = Rig::new(Settings::default());
    std::fs::create_dir_all(rig.local_dir()).unwrap();
    common::write_images(&rig.local_dir(), [3, 7, 12]);

    rig.tap(PLAY);
    assert_eq!(rig.app.playback().map(|p| p.number), Some(12));

    let mut visited = Vec::new();
    for step in [NEXT, PREV, PREV, PREV] {
        rig.tap(step);
        visited.push(rig.app.playback().map(|p| p.number).unwrap());
    }
    assert_eq!(visited, vec![3, 12, 7, 3]);
    assert_eq!(rig.role(), ScreenRole::Playback);
}

#[test]
fn test_delete_flow() {
    let mut rig = Rig::new(Settings::default());
    let dir = rig.local_dir();
    std::fs::create_dir_all(&dir).unwrap();
    common::write_images(&dir, [3, 7]);

    rig.tap(PLAY);
    rig.tap(TRASH);
    assert_eq!(rig.role(), ScreenRole::DeleteConfirm);

    rig.tap(DELETE_NO);
    assert_eq!(rig.role(), ScreenRole::Playback);
    assert!(dir.join("IMG_0007.JPG").exists());

    rig.tap(TRASH);
    rig.tap(DELETE_YES);
    assert!(!dir.join("IMG_0007.JPG").exists());
    assert_eq!(rig.role(), ScreenRole::Playback);
    assert_eq!(rig.app.playback().map(|p| p.number), Some(3));

    rig.tap(TRASH);
    rig.tap(DELETE_YES);
    assert!(!dir.join("IMG_0003.JPG").exists());
    assert_eq!(rig.role(), ScreenRole::NoImages);
}

#[test]
fn test_delete_forgets_retained_capture() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(SHUTTER);
    rig.tap(PLAY);
    rig.tap(TRASH);
    rig.tap(DELETE_YES);

    assert!(rig.app.retained().is_none());
    assert_eq!(rig.role(), ScreenRole::NoImages);
}

#[test]
fn test_delete_after_storage_switch_removes_the_shown_file() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(SHUTTER);
    let boot = rig.dir.path().join("boot");
    std::fs::create_dir_all(&boot).unwrap();
    common::write_images(&boot, [1]);

    rig.tap(GEAR);
    rig.tap(RADIOS[1]);
    rig.tap(DONE);
    assert_eq!(rig.app.settings().storage, 1);

    rig.tap(PLAY);
    assert_eq!(rig.app.playback().map(|p| p.dir.clone()), Some(rig.local_dir()));
    rig.tap(TRASH);
    rig.tap(DELETE_YES);

    assert!(boot.join("IMG_0001.JPG").exists(), "unseen image must survive");
    assert!(!rig.local_dir().join("IMG_0001.JPG").exists());
    assert_eq!(rig.role(), ScreenRole::NoImages);
}

// =============================================================================
// Event loop
// =============================================================================

#[test]
fn test_event_loop_scripted_session() {
    let mut rig = Rig::new(Settings::default());
    let mut input = ScriptedInput::new([
        None,
        Some(tap(GEAR.0, GEAR.1)),
        Some(tap(NEXT.0, NEXT.1)),
        None,
        Some(tap(DONE.0, DONE.1)),
        None,
    ]);
    let quit = AtomicBool::new(false);

    event_loop::run(&mut rig.app, &mut input, &quit).unwrap();

    assert!(rig.app.should_exit());
    assert_eq!(input.remaining(), 0);
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
    assert_eq!(rig.app.last_settings_panel(), SettingsPanel::Size);
    assert!(rig.settings_path().exists());

    let frames = rig
        .calls()
        .iter()
        .filter(|c| **c == CameraCall::CaptureToBuffer)
        .count();
    assert!(frames >= 2, "live screens grab a frame per iteration");
}

#[test]
fn test_event_loop_honours_external_quit() {
    let mut rig = Rig::new(Settings::default());
    let mut input = ScriptedInput::new([Some(tap(GEAR.0, GEAR.1))]);
    let quit = AtomicBool::new(true);

    event_loop::run(&mut rig.app, &mut input, &quit).unwrap();

    assert!(rig.app.should_exit());
    assert_eq!(input.remaining(), 1);
    assert_eq!(rig.role(), ScreenRole::Viewfinder);
}

#[test]
fn test_miss_dispatches_nothing() {
    let mut rig = Rig::new(Settings::default());
    rig.tap(GEAR);
    // Between the arrows and the title on the storage panel
    assert!(!rig.tap((160, 55)));
    assert_eq!(rig.role(), ScreenRole::Settings(SettingsPanel::Storage));
}
