// SPDX-License-Identifier: GPL-3.0-only

//! Capture pipelines
//!
//! - [`photo`]: still capture coordination, busy indicator and previews

pub mod photo;
