// SPDX-License-Identifier: GPL-3.0-only

//! Touchcam - control logic for a point-and-shoot camera with a touch display
//!
//! This library provides the screen/button state machine, the capture
//! coordinator and the persisted settings of a small single-board-computer
//! camera.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Screens, buttons, command handlers and the event loop
//! - [`backends`]: Camera, display, input and uploader abstraction
//! - [`media`]: Viewfinder color conversion
//! - [`pipelines`]: Still capture coordination and the busy indicator
//! - [`config`]: Runtime configuration
//! - [`settings`]: Persisted user preferences
//! - [`storage`]: Image numbering, directories and file ownership
//!
//! # Example
//!
//! ```ignore
//! // Run the touch UI in a terminal:
//! // touchcam
//! // Take one picture headlessly:
//! // touchcam capture
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod media;
pub mod pipelines;
pub mod settings;
pub mod storage;

// Re-export commonly used types
pub use app::{App, Devices, ScreenRole, SettingsPanel};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use settings::Settings;
