// SPDX-License-Identifier: GPL-3.0-only

//! Terminal display and input
//!
//! Stands in for the touch screen on a development machine. The framebuffer
//! is stretched over the whole terminal using Unicode half-block characters
//! (two vertical pixels per cell), and left mouse clicks are mapped back to
//! framebuffer coordinates as taps.

use super::{Framebuffer, InputEvent, InputSource, Point, Rect, Resolution, Surface};
use crate::errors::{BackendError, BackendResult};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::{Rgb, RgbImage, RgbaImage};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect as Area, style::Color,
    widgets::Widget,
};
use std::io::{Stdout, stdout};
use std::time::Duration;
use tracing::{debug, warn};

/// Raw mode, alternate screen and mouse capture for the lifetime of the value
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> BackendResult<Self> {
        enable_raw_mode()
            .map_err(|e| BackendError::InitializationFailed(format!("raw mode: {}", e)))?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(BackendError::InitializationFailed(format!(
                "alternate screen: {}",
                e
            )));
        }
        debug!("Terminal session started");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to disable raw mode");
        }
        debug!("Terminal session restored");
    }
}

/// Framebuffer presented through ratatui
pub struct TerminalSurface {
    framebuffer: Framebuffer,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSurface {
    /// Create a surface of `size` pixels; requires an active [`TerminalSession`]
    pub fn new(size: Resolution) -> BackendResult<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))
            .map_err(|e| BackendError::InitializationFailed(format!("terminal: {}", e)))?;
        Ok(Self {
            framebuffer: Framebuffer::new(size.width, size.height),
            terminal,
        })
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> Resolution {
        self.framebuffer.size()
    }

    fn fill(&mut self, rect: Rect, color: Rgb<u8>) {
        self.framebuffer.fill(rect, color);
    }

    fn blit(&mut self, image: &RgbImage, at: Point) {
        self.framebuffer.blit(image, at);
    }

    fn blit_rgba(&mut self, image: &RgbaImage, at: Point) {
        self.framebuffer.blit_rgba(image, at);
    }

    fn present(&mut self) -> BackendResult<()> {
        let widget = FramebufferWidget {
            image: self.framebuffer.image(),
        };
        self.terminal.draw(|f| f.render_widget(widget, f.area()))?;
        self.framebuffer.present()
    }
}

/// Widget that stretches an RGB image over the whole area with half-blocks
struct FramebufferWidget<'a> {
    image: &'a RgbImage,
}

impl Widget for FramebufferWidget<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || area.width == 0 || area.height == 0 {
            return;
        }

        let pixel_rows = area.height as u32 * 2;
        for ty in 0..area.height {
            for tx in 0..area.width {
                let src_x = tx as u32 * width / area.width as u32;
                let src_top = (ty as u32 * 2) * height / pixel_rows;
                let src_bottom = (ty as u32 * 2 + 1) * height / pixel_rows;

                let Some(cell) = buf.cell_mut((area.x + tx, area.y + ty)) else {
                    continue;
                };
                cell.set_char('▀');
                cell.set_fg(color_at(self.image, src_x, src_top));
                cell.set_bg(color_at(self.image, src_x, src_bottom));
            }
        }
    }
}

fn color_at(image: &RgbImage, x: u32, y: u32) -> Color {
    let x = x.min(image.width() - 1);
    let y = y.min(image.height() - 1);
    let [r, g, b] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

/// Mouse clicks as taps; `q`, Esc or Ctrl+C as quit
pub struct TerminalInput {
    screen: Resolution,
}

impl TerminalInput {
    /// `screen` is the size of the framebuffer clicks are mapped onto
    pub fn new(screen: Resolution) -> Self {
        Self { screen }
    }
}

impl InputSource for TerminalInput {
    fn next_event(&mut self, timeout: Duration) -> BackendResult<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (cols, rows) = crossterm::terminal::size()?;
                let point = cell_to_pixel(mouse.column, mouse.row, cols, rows, self.screen);
                debug!(column = mouse.column, row = mouse.row, ?point, "Tap");
                Ok(Some(InputEvent::Tap(point)))
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    Ok(Some(InputEvent::Quit))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }
}

/// Center of the framebuffer region shown in terminal cell (`column`, `row`)
pub fn cell_to_pixel(column: u16, row: u16, cols: u16, rows: u16, screen: Resolution) -> Point {
    let cols = cols.max(1) as u32;
    let rows = rows.max(1) as u32;
    let x = (column as u32 * screen.width + screen.width / 2) / cols;
    let y = (row as u32 * screen.height + screen.height / 2) / rows;
    Point::new(
        x.min(screen.width.saturating_sub(1)) as i32,
        y.min(screen.height.saturating_sub(1)) as i32,
    )
}
