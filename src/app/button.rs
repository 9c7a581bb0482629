// SPDX-License-Identifier: GPL-3.0-only

//! Tappable regions
//!
//! A [`Button`] is a rectangle with optional visuals and an optional command.
//! The visual part ([`ButtonFace`]) is plain data that the busy indicator can
//! clone and draw from its own thread; the command is a function pointer over
//! the application context `C`, so buttons never close over global state.

use super::icons::{Icon, IconRegistry};
use crate::backends::{Point, Rect, Surface};
use image::Rgb;
use std::fmt;
use tracing::debug;

/// What a button does when tapped
///
/// Either a plain command, or a command that receives the argument captured
/// when the button was built.
pub enum Command<C> {
    Plain(fn(&mut C)),
    WithValue(fn(&mut C, i32), i32),
}

impl<C> Command<C> {
    pub fn invoke(self, ctx: &mut C) {
        match self {
            Command::Plain(f) => f(ctx),
            Command::WithValue(f, value) => f(ctx, value),
        }
    }

    /// Argument bound to the command, if any
    pub fn value(&self) -> Option<i32> {
        match self {
            Command::Plain(_) => None,
            Command::WithValue(_, value) => Some(*value),
        }
    }
}

// Manual impls: derives would require `C: Clone`/`C: Debug`.
impl<C> Clone for Command<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Command<C> {}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Plain(_) => write!(f, "Plain"),
            Command::WithValue(_, value) => write!(f, "WithValue({})", value),
        }
    }
}

/// Geometry and visuals of a button
#[derive(Debug, Clone)]
pub struct ButtonFace {
    bounds: Rect,
    fill: Option<Rgb<u8>>,
    background: Option<Icon>,
    foreground: Option<Icon>,
}

impl ButtonFace {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            fill: None,
            background: None,
            foreground: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn background_name(&self) -> Option<&str> {
        self.background.as_ref().map(Icon::name)
    }

    pub fn foreground_name(&self) -> Option<&str> {
        self.foreground.as_ref().map(Icon::name)
    }

    /// Paint fill, then background icon, then foreground icon
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(color) = self.fill {
            surface.fill(self.bounds, color);
        }
        if let Some(icon) = &self.background {
            icon.draw_centered(surface, self.bounds);
        }
        if let Some(icon) = &self.foreground {
            icon.draw_centered(surface, self.bounds);
        }
    }

    /// Swap the background icon by name
    ///
    /// `None` clears it. A name the registry does not know leaves the current
    /// background untouched.
    pub fn set_background(&mut self, icons: &IconRegistry, name: Option<&str>) {
        match name {
            None => self.background = None,
            Some(name) => match icons.get(name) {
                Some(icon) => self.background = Some(icon.clone()),
                None => debug!(name, "Unknown background icon ignored"),
            },
        }
    }

    /// Swap the foreground icon by name, with the same rules as the background
    pub fn set_foreground(&mut self, icons: &IconRegistry, name: Option<&str>) {
        match name {
            None => self.foreground = None,
            Some(name) => match icons.get(name) {
                Some(icon) => self.foreground = Some(icon.clone()),
                None => debug!(name, "Unknown foreground icon ignored"),
            },
        }
    }

    /// Move horizontally, keeping size and vertical position
    pub fn move_to_x(&mut self, x: i32) {
        self.bounds = self.bounds.with_x(x);
    }
}

/// A tappable region with optional visuals and an optional command
pub struct Button<C> {
    face: ButtonFace,
    command: Option<Command<C>>,
}

impl<C> Button<C> {
    /// A bare button: no visuals, no command
    pub fn new(bounds: Rect) -> Self {
        Self {
            face: ButtonFace::new(bounds),
            command: None,
        }
    }

    pub fn fill(mut self, color: Rgb<u8>) -> Self {
        self.face.fill = Some(color);
        self
    }

    pub fn background(mut self, icons: &IconRegistry, name: &str) -> Self {
        self.face.set_background(icons, Some(name));
        self
    }

    pub fn foreground(mut self, icons: &IconRegistry, name: &str) -> Self {
        self.face.set_foreground(icons, Some(name));
        self
    }

    pub fn on_tap(mut self, f: fn(&mut C)) -> Self {
        self.command = Some(Command::Plain(f));
        self
    }

    pub fn on_tap_with(mut self, f: fn(&mut C, i32), value: i32) -> Self {
        self.command = Some(Command::WithValue(f, value));
        self
    }

    pub fn face(&self) -> &ButtonFace {
        &self.face
    }

    pub fn face_mut(&mut self) -> &mut ButtonFace {
        &mut self.face
    }

    pub fn command(&self) -> Option<Command<C>> {
        self.command
    }

    pub fn contains(&self, point: Point) -> bool {
        self.face.contains(point)
    }

    /// Run the command if `point` is inside; returns whether it was inside
    ///
    /// A button without a command still reports the hit.
    pub fn hit_test(&self, point: Point, ctx: &mut C) -> bool {
        if !self.contains(point) {
            return false;
        }
        if let Some(command) = self.command {
            command.invoke(ctx);
        }
        true
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.face.draw(surface);
    }
}

impl<C> fmt::Debug for Button<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("face", &self.face)
            .field("command", &self.command)
            .finish()
    }
}
