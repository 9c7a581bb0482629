// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use crate::backends::types::{CropRect, Rect, Resolution};
use std::time::Duration;

/// Camera image effects, in the order the effect panel cycles through them
pub const EFFECTS: [&str; 17] = [
    "none",
    "sketch",
    "gpen",
    "pastel",
    "watercolor",
    "oilpaint",
    "hatch",
    "negative",
    "colorswap",
    "posterise",
    "denoise",
    "blur",
    "film",
    "washedout",
    "emboss",
    "cartoon",
    "solarize",
];

/// One stop on the ISO slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoStep {
    /// Sensor ISO (0 = automatic)
    pub value: u32,
    /// Horizontal pixel position of the slider marker's tip
    pub marker_x: i32,
}

/// ISO settings, lowest to highest
pub const ISO_STEPS: [IsoStep; 8] = [
    IsoStep { value: 0, marker_x: 27 },
    IsoStep { value: 100, marker_x: 64 },
    IsoStep { value: 200, marker_x: 97 },
    IsoStep { value: 320, marker_x: 137 },
    IsoStep { value: 400, marker_x: 164 },
    IsoStep { value: 500, marker_x: 197 },
    IsoStep { value: 640, marker_x: 244 },
    IsoStep { value: 800, marker_x: 297 },
];

/// Still capture size with its matching viewfinder mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePreset {
    /// Short name, also used for the radio button icon (`size-<name>`)
    pub name: &'static str,
    /// Still capture resolution
    pub full: Resolution,
    /// Viewfinder resolution
    pub preview: Resolution,
    /// Sensor crop used for the still
    pub crop: CropRect,
}

/// Capture sizes, largest first
pub const SIZE_PRESETS: [SizePreset; 3] = [
    SizePreset {
        name: "l",
        full: Resolution::new(2592, 1944),
        preview: Resolution::new(320, 240),
        crop: CropRect::FULL,
    },
    SizePreset {
        name: "m",
        full: Resolution::new(1920, 1080),
        preview: Resolution::new(320, 180),
        crop: CropRect::new(0.1296, 0.2222, 0.7408, 0.5556),
    },
    SizePreset {
        name: "s",
        full: Resolution::new(1440, 1080),
        preview: Resolution::new(320, 240),
        crop: CropRect::new(0.2222, 0.2222, 0.5556, 0.5556),
    },
];

/// Captured file name prefix
pub const IMAGE_PREFIX: &str = "IMG_";

/// Captured file name extension
pub const IMAGE_EXTENSION: &str = "JPG";

/// Highest image sequence number before wrapping to 0
pub const MAX_IMAGE_NUMBER: u16 = 9999;

/// Mode for directories created by a capture (rwxr-xr-x)
pub const DIRECTORY_MODE: u32 = 0o755;

/// Mode for captured files (rw-r--r--)
pub const FILE_MODE: u32 = 0o644;

/// How long the post-capture preview stays on screen
pub const PREVIEW_DWELL: Duration = Duration::from_millis(2500);

/// Busy spinner frame interval
pub const BUSY_FRAME_INTERVAL: Duration = Duration::from_millis(150);

/// Number of busy spinner frames (`work-0` .. `work-4`)
pub const BUSY_FRAME_COUNT: usize = 5;

/// Input wait per modal loop iteration
pub const MODAL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Display width in pixels
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Display size; the `ui` layout is drawn for exactly this size
pub const SCREEN_SIZE: Resolution = Resolution::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// Screen layout geometry
pub mod ui {
    use super::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

    /// Full screen; used for passive background buttons
    pub const FULL_SCREEN: Rect = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

    /// Bottom bar "done" button
    pub const DONE: Rect = Rect::new(0, 188, 320, 52);

    /// Top-left "previous" arrow
    pub const PREV: Rect = Rect::new(0, 0, 80, 52);

    /// Top-right "next" arrow
    pub const NEXT: Rect = Rect::new(240, 0, 80, 52);

    /// Trash can in playback
    pub const TRASH: Rect = Rect::new(121, 0, 78, 52);

    /// Viewfinder gear (settings) button
    pub const GEAR: Rect = Rect::new(0, 188, 156, 52);

    /// Viewfinder play button
    pub const PLAY: Rect = Rect::new(164, 188, 156, 52);

    /// "Working" label shown during a capture
    pub const WORKING_LABEL: Rect = Rect::new(88, 51, 157, 102);

    /// Busy spinner
    pub const SPINNER: Rect = Rect::new(148, 110, 22, 22);

    /// Playback variant of the busy label (below the arrows)
    pub const PLAYBACK_WORKING_LABEL: Rect = Rect::new(88, 70, 157, 102);

    /// Playback variant of the busy spinner
    pub const PLAYBACK_SPINNER: Rect = Rect::new(148, 129, 22, 22);

    /// Settings panel title
    pub const TITLE: Rect = Rect::new(0, 10, 320, 35);

    /// Row of radio buttons: top, height, horizontal margin and gap
    pub const RADIO_TOP: i32 = 60;
    pub const RADIO_HEIGHT: u32 = 120;
    pub const RADIO_MARGIN: i32 = 2;
    pub const RADIO_GAP: i32 = 8;

    /// Left/right arrows inside the effect and ISO panels
    pub const STEP_LEFT: Rect = Rect::new(0, 70, 80, 52);
    pub const STEP_RIGHT: Rect = Rect::new(240, 70, 80, 52);

    /// Effect name label
    pub const EFFECT_LABEL: Rect = Rect::new(0, 67, 320, 91);

    /// ISO value label
    pub const ISO_LABEL: Rect = Rect::new(0, 79, 320, 33);

    /// ISO scale bar
    pub const ISO_BAR: Rect = Rect::new(9, 134, 302, 26);

    /// ISO slider marker (x is overwritten from the ISO table)
    pub const ISO_MARKER: Rect = Rect::new(17, 157, 21, 19);

    /// Offset from the marker's left edge to its tip
    pub const ISO_MARKER_TIP: i32 = 10;

    /// Quit confirmation button
    pub const QUIT_OK: Rect = Rect::new(110, 60, 100, 120);

    /// Delete confirmation: title, yes and no
    pub const DELETE_TITLE: Rect = Rect::new(0, 35, 320, 33);
    pub const DELETE_YES: Rect = Rect::new(32, 86, 120, 100);
    pub const DELETE_NO: Rect = Rect::new(168, 86, 120, 100);

    /// "No images" message
    pub const EMPTY_MESSAGE: Rect = Rect::new(0, 53, 320, 80);
}
