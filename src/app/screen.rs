// SPDX-License-Identifier: GPL-3.0-only

//! Screens and the screen table
//!
//! The current screen index is the whole UI state. Screens are addressed by
//! role; the numeric order is an internal detail except that settings panels
//! must sit in one contiguous run so "next"/"previous" can cycle through them.

use super::button::Button;
use crate::backends::{Point, Surface};
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// Settings panels, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsPanel {
    Storage,
    Size,
    Effect,
    Iso,
    Quit,
}

impl SettingsPanel {
    pub const ALL: [SettingsPanel; 5] = [
        SettingsPanel::Storage,
        SettingsPanel::Size,
        SettingsPanel::Effect,
        SettingsPanel::Iso,
        SettingsPanel::Quit,
    ];
}

/// What a screen is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenRole {
    Viewfinder,
    Playback,
    DeleteConfirm,
    NoImages,
    Settings(SettingsPanel),
}

impl ScreenRole {
    pub fn is_settings(&self) -> bool {
        matches!(self, ScreenRole::Settings(_))
    }

    /// Which loop discipline drives this screen
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self {
            ScreenRole::Viewfinder => DispatchMode::Live,
            _ => DispatchMode::Modal,
        }
    }
}

impl fmt::Display for ScreenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenRole::Viewfinder => write!(f, "viewfinder"),
            ScreenRole::Playback => write!(f, "playback"),
            ScreenRole::DeleteConfirm => write!(f, "delete"),
            ScreenRole::NoImages => write!(f, "no-images"),
            ScreenRole::Settings(panel) => write!(f, "settings/{:?}", panel),
        }
    }
}

/// Event loop discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Drain input, then capture and show one preview frame, every iteration
    Live,
    /// Render once, then block on input until the screen changes
    Modal,
}

/// An ordered list of buttons
///
/// The lowest-index button containing a tap wins it; drawing goes in
/// ascending index order, so later buttons paint over earlier ones.
pub struct Screen<C> {
    role: ScreenRole,
    buttons: Vec<Button<C>>,
}

impl<C> Screen<C> {
    pub fn new(role: ScreenRole, buttons: Vec<Button<C>>) -> Self {
        Self { role, buttons }
    }

    pub fn role(&self) -> ScreenRole {
        self.role
    }

    pub fn buttons(&self) -> &[Button<C>] {
        &self.buttons
    }

    pub fn button(&self, index: usize) -> Option<&Button<C>> {
        self.buttons.get(index)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut Button<C>> {
        self.buttons.get_mut(index)
    }

    /// Index of the button that wins a tap at `point`
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(point))
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for button in &self.buttons {
            button.draw(surface);
        }
    }
}

/// All screens plus the current screen index
pub struct ScreenTable<C> {
    screens: Vec<Screen<C>>,
    current: usize,
    settings: Range<usize>,
}

impl<C> ScreenTable<C> {
    /// Build the table; starts on the viewfinder
    ///
    /// Fails unless there is exactly one viewfinder, each role appears at most
    /// once, and the settings panels form one non-empty contiguous run.
    pub fn new(screens: Vec<Screen<C>>) -> AppResult<Self> {
        for (i, screen) in screens.iter().enumerate() {
            if screens[..i].iter().any(|s| s.role == screen.role) {
                return Err(AppError::Config(format!("duplicate screen {}", screen.role)));
            }
        }

        let current = screens
            .iter()
            .position(|s| s.role == ScreenRole::Viewfinder)
            .ok_or_else(|| AppError::Config("no viewfinder screen".to_string()))?;

        let first = screens.iter().position(|s| s.role.is_settings());
        let last = screens.iter().rposition(|s| s.role.is_settings());
        let settings = match (first, last) {
            (Some(first), Some(last)) => first..last + 1,
            _ => return Err(AppError::Config("no settings panels".to_string())),
        };
        if !screens[settings.clone()].iter().all(|s| s.role.is_settings()) {
            return Err(AppError::Config(
                "settings panels must be contiguous".to_string(),
            ));
        }

        Ok(Self {
            screens,
            current,
            settings,
        })
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Screen<C> {
        &self.screens[self.current]
    }

    pub fn current_role(&self) -> ScreenRole {
        self.current().role
    }

    pub fn index_of(&self, role: ScreenRole) -> Option<usize> {
        self.screens.iter().position(|s| s.role == role)
    }

    pub fn screen(&self, role: ScreenRole) -> Option<&Screen<C>> {
        self.screens.iter().find(|s| s.role == role)
    }

    pub fn screen_mut(&mut self, role: ScreenRole) -> Option<&mut Screen<C>> {
        self.screens.iter_mut().find(|s| s.role == role)
    }

    /// Jump to `role`; returns false if the table has no such screen
    pub fn set_current(&mut self, role: ScreenRole) -> bool {
        match self.index_of(role) {
            Some(index) => {
                debug!(from = %self.current_role(), to = %role, "Screen change");
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Index range of the settings panels
    pub fn settings_range(&self) -> Range<usize> {
        self.settings.clone()
    }

    /// Step through the settings panels, wrapping at both ends
    ///
    /// From outside the settings run this lands relative to the first panel.
    pub fn cycle_settings(&mut self, delta: i32) {
        let len = self.settings.len() as i64;
        let offset = self.current.saturating_sub(self.settings.start) as i64;
        let offset = if self.settings.contains(&self.current) {
            offset
        } else {
            0
        };
        let next = (offset + delta as i64).rem_euclid(len) as usize;
        let role = self.screens[self.settings.start + next].role;
        self.set_current(role);
    }
}

/// A context that owns its screen table
pub trait ScreenHost: Sized {
    fn screens(&self) -> &ScreenTable<Self>;
}

/// Hit-test `point` on the current screen and run the winning command
///
/// Returns whether any button contained the point.
pub fn dispatch_tap<C: ScreenHost>(ctx: &mut C, point: Point) -> bool {
    let screen = ctx.screens().current();
    let Some(index) = screen.hit_test(point) else {
        return false;
    };
    let command = screen.buttons()[index].command();
    debug!(?point, screen = %screen.role(), button = index, "Tap dispatched");
    if let Some(command) = command {
        command.invoke(ctx);
    }
    true
}
