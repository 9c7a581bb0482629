// SPDX-License-Identifier: GPL-3.0-only

//! Button command handlers
//!
//! Handlers are grouped by the screens that use them. Every handler is a
//! method on [`App`](super::App) so it can be stored as a plain function
//! pointer in a button.

pub mod navigation;
pub mod playback;
pub mod settings;
