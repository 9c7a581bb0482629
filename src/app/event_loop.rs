// SPDX-License-Identifier: GPL-3.0-only

//! Live and modal dispatch loops
//!
//! Live screens never wait for input: each iteration drains whatever taps are
//! pending, then grabs and shows one viewfinder frame, which paces the loop.
//! Modal screens render once and then block on input until a command moves
//! to another screen.

use super::{App, DispatchMode};
use crate::backends::{InputEvent, InputSource};
use crate::constants::MODAL_POLL_INTERVAL;
use crate::errors::AppResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Run until a quit command, an input quit request, or `quit` is raised
pub fn run(app: &mut App, input: &mut dyn InputSource, quit: &AtomicBool) -> AppResult<()> {
    info!(screen = %app.current_role(), "Event loop started");

    while !stopping(app, quit) {
        match app.current_role().dispatch_mode() {
            DispatchMode::Live => live_iteration(app, input)?,
            DispatchMode::Modal => modal_session(app, input, quit)?,
        }
    }

    info!("Event loop finished");
    Ok(())
}

fn stopping(app: &mut App, quit: &AtomicBool) -> bool {
    if quit.load(Ordering::SeqCst) {
        app.request_exit();
    }
    app.should_exit()
}

/// Handle one event; returns false once the loop should stop
fn handle(app: &mut App, event: InputEvent) -> bool {
    match event {
        InputEvent::Tap(point) => {
            app.tap(point);
        }
        InputEvent::Quit => {
            debug!("Quit event received");
            app.request_exit();
        }
    }
    !app.should_exit()
}

/// Drain pending input, then show one viewfinder frame
pub fn live_iteration(app: &mut App, input: &mut dyn InputSource) -> AppResult<()> {
    while let Some(event) = input.next_event(Duration::ZERO)? {
        if !handle(app, event) {
            return Ok(());
        }
    }
    app.render_live_frame()
}

/// Render once, then dispatch taps until the screen index changes
pub fn modal_session(
    app: &mut App,
    input: &mut dyn InputSource,
    quit: &AtomicBool,
) -> AppResult<()> {
    let entered = app.screens().current_index();
    debug!(screen = %app.current_role(), "Modal session");
    app.render_static()?;

    loop {
        if stopping(app, quit) {
            return Ok(());
        }
        let Some(event) = input.next_event(MODAL_POLL_INTERVAL)? else {
            continue;
        };
        if !handle(app, event) || app.screens().current_index() != entered {
            return Ok(());
        }
        // Same screen: show radio and label changes made by the command
        app.render_static()?;
    }
}
