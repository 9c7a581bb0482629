// SPDX-License-Identifier: GPL-3.0-only

//! Screen layout
//!
//! Builds every screen with its buttons in hit-test order. Indices of the
//! buttons that change at runtime are exported so handlers can find them.

use super::button::Button;
use super::icons::IconRegistry;
use super::screen::{Screen, ScreenRole, ScreenTable, SettingsPanel};
use super::App;
use crate::backends::Rect;
use crate::config::StorageTarget;
use crate::constants::{SIZE_PRESETS, SCREEN_WIDTH, ui};
use crate::errors::AppResult;

/// Radio indicator icons
pub const RADIO_ON: &str = "radio3-1";
pub const RADIO_OFF: &str = "radio3-0";

/// Busy label and spinner slots on the viewfinder and playback screens
pub const BUSY_LABEL: usize = 3;
pub const BUSY_SPINNER: usize = 4;

/// First radio button on the storage and size panels
pub const FIRST_RADIO: usize = 3;

/// Effect name label on the effect panel
pub const EFFECT_LABEL: usize = 5;

/// Value label and slider marker on the ISO panel
pub const ISO_LABEL: usize = 5;
pub const ISO_MARKER: usize = 7;

/// Screens that show the busy indicator, with their label and spinner slots
pub fn busy_slots(role: ScreenRole) -> Option<(usize, usize)> {
    match role {
        ScreenRole::Viewfinder | ScreenRole::Playback => Some((BUSY_LABEL, BUSY_SPINNER)),
        _ => None,
    }
}

/// Build the full screen table, starting on the viewfinder
pub fn build(icons: &IconRegistry, targets: &[StorageTarget]) -> AppResult<ScreenTable<App>> {
    let mut screens = vec![
        viewfinder(icons),
        playback(icons),
        delete_confirm(icons),
        no_images(icons),
    ];
    screens.extend(SettingsPanel::ALL.iter().map(|panel| match panel {
        SettingsPanel::Storage => storage_panel(icons, targets),
        SettingsPanel::Size => size_panel(icons),
        SettingsPanel::Effect => effect_panel(icons),
        SettingsPanel::Iso => iso_panel(icons),
        SettingsPanel::Quit => quit_panel(icons),
    }));
    ScreenTable::new(screens)
}

/// The full-screen shutter comes after gear and play so they win their taps
fn viewfinder(icons: &IconRegistry) -> Screen<App> {
    Screen::new(
        ScreenRole::Viewfinder,
        vec![
            Button::new(ui::GEAR)
                .background(icons, "gear")
                .on_tap(App::on_gear),
            Button::new(ui::PLAY)
                .background(icons, "play")
                .on_tap(App::on_play),
            Button::new(ui::FULL_SCREEN).on_tap(App::on_shutter),
            Button::new(ui::WORKING_LABEL),
            Button::new(ui::SPINNER),
        ],
    )
}

fn playback(icons: &IconRegistry) -> Screen<App> {
    Screen::new(
        ScreenRole::Playback,
        vec![
            Button::new(ui::DONE)
                .background(icons, "done")
                .on_tap(App::on_done),
            Button::new(ui::PREV)
                .background(icons, "prev")
                .on_tap_with(App::on_image_step, -1),
            Button::new(ui::NEXT)
                .background(icons, "next")
                .on_tap_with(App::on_image_step, 1),
            Button::new(ui::PLAYBACK_WORKING_LABEL),
            Button::new(ui::PLAYBACK_SPINNER),
            Button::new(ui::TRASH)
                .background(icons, "trash")
                .on_tap(App::on_trash),
        ],
    )
}

fn delete_confirm(icons: &IconRegistry) -> Screen<App> {
    Screen::new(
        ScreenRole::DeleteConfirm,
        vec![
            Button::new(ui::DELETE_TITLE).background(icons, "delete"),
            Button::new(ui::DELETE_YES)
                .background(icons, "yn")
                .foreground(icons, "yes")
                .on_tap_with(App::on_delete, 1),
            Button::new(ui::DELETE_NO)
                .background(icons, "yn")
                .foreground(icons, "no")
                .on_tap_with(App::on_delete, 0),
        ],
    )
}

/// Any tap leaves; the done bar is drawn but the full-screen button wins
fn no_images(icons: &IconRegistry) -> Screen<App> {
    Screen::new(
        ScreenRole::NoImages,
        vec![
            Button::new(ui::FULL_SCREEN).on_tap(App::on_done),
            Button::new(ui::DONE).background(icons, "done"),
            Button::new(ui::EMPTY_MESSAGE).background(icons, "empty"),
        ],
    )
}

/// Done, previous panel and next panel, shared by every settings panel
fn panel_navigation(icons: &IconRegistry) -> Vec<Button<App>> {
    vec![
        Button::new(ui::DONE)
            .background(icons, "done")
            .on_tap(App::on_done),
        Button::new(ui::PREV)
            .background(icons, "prev")
            .on_tap_with(App::on_cycle_settings, -1),
        Button::new(ui::NEXT)
            .background(icons, "next")
            .on_tap_with(App::on_cycle_settings, 1),
    ]
}

/// Evenly spaced radio slots across the screen
pub fn radio_bounds(count: usize) -> Vec<Rect> {
    let count = count.max(1) as i32;
    let usable = SCREEN_WIDTH as i32 - 2 * ui::RADIO_MARGIN - (count - 1) * ui::RADIO_GAP;
    let width = (usable / count).max(1);
    (0..count)
        .map(|i| {
            Rect::new(
                ui::RADIO_MARGIN + i * (width + ui::RADIO_GAP),
                ui::RADIO_TOP,
                width as u32,
                ui::RADIO_HEIGHT,
            )
        })
        .collect()
}

fn storage_panel(icons: &IconRegistry, targets: &[StorageTarget]) -> Screen<App> {
    let mut buttons = panel_navigation(icons);
    for (i, (bounds, target)) in radio_bounds(targets.len()).into_iter().zip(targets).enumerate() {
        buttons.push(
            Button::new(bounds)
                .background(icons, RADIO_OFF)
                .foreground(icons, &target.icon)
                .on_tap_with(App::on_storage, i as i32),
        );
    }
    buttons.push(Button::new(ui::TITLE).background(icons, "storage"));
    Screen::new(ScreenRole::Settings(SettingsPanel::Storage), buttons)
}

fn size_panel(icons: &IconRegistry) -> Screen<App> {
    let mut buttons = panel_navigation(icons);
    for (i, (bounds, preset)) in radio_bounds(SIZE_PRESETS.len())
        .into_iter()
        .zip(SIZE_PRESETS.iter())
        .enumerate()
    {
        buttons.push(
            Button::new(bounds)
                .background(icons, RADIO_OFF)
                .foreground(icons, &format!("size-{}", preset.name))
                .on_tap_with(App::on_size, i as i32),
        );
    }
    buttons.push(Button::new(ui::TITLE).background(icons, "size"));
    Screen::new(ScreenRole::Settings(SettingsPanel::Size), buttons)
}

fn effect_panel(icons: &IconRegistry) -> Screen<App> {
    let mut buttons = panel_navigation(icons);
    buttons.extend([
        Button::new(ui::STEP_LEFT)
            .background(icons, "left")
            .on_tap_with(App::on_effect_step, -1),
        Button::new(ui::STEP_RIGHT)
            .background(icons, "right")
            .on_tap_with(App::on_effect_step, 1),
        Button::new(ui::EFFECT_LABEL).background(icons, "fx-none"),
        Button::new(ui::TITLE).background(icons, "fx"),
    ]);
    Screen::new(ScreenRole::Settings(SettingsPanel::Effect), buttons)
}

fn iso_panel(icons: &IconRegistry) -> Screen<App> {
    let mut buttons = panel_navigation(icons);
    buttons.extend([
        Button::new(ui::STEP_LEFT)
            .background(icons, "left")
            .on_tap_with(App::on_iso_step, -1),
        Button::new(ui::STEP_RIGHT)
            .background(icons, "right")
            .on_tap_with(App::on_iso_step, 1),
        Button::new(ui::ISO_LABEL).background(icons, "iso-0"),
        Button::new(ui::ISO_BAR).background(icons, "iso-bar"),
        Button::new(ui::ISO_MARKER).background(icons, "iso-arrow"),
        Button::new(ui::TITLE).background(icons, "iso"),
    ]);
    Screen::new(ScreenRole::Settings(SettingsPanel::Iso), buttons)
}

fn quit_panel(icons: &IconRegistry) -> Screen<App> {
    let mut buttons = panel_navigation(icons);
    buttons.extend([
        Button::new(ui::QUIT_OK)
            .background(icons, "quit-ok")
            .on_tap(App::on_quit),
        Button::new(ui::TITLE).background(icons, "quit"),
    ]);
    Screen::new(ScreenRole::Settings(SettingsPanel::Quit), buttons)
}
