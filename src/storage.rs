// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for captured images
//!
//! Files are named `IMG_NNNN.JPG` with a four-digit, zero-padded sequence
//! number that wraps from 9999 back to 0. The [`ImageCursor`] remembers the
//! next candidate number per storage target so a directory is only scanned
//! when the target changes.

use crate::config::StorageTarget;
use crate::constants::{
    DIRECTORY_MODE, FILE_MODE, IMAGE_EXTENSION, IMAGE_PREFIX, MAX_IMAGE_NUMBER,
};
use crate::errors::{CaptureError, CaptureResult};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SLOT_COUNT: u32 = MAX_IMAGE_NUMBER as u32 + 1;

/// File name for sequence number `n`
pub fn image_filename(n: u16) -> String {
    format!("{}{:04}.{}", IMAGE_PREFIX, n, IMAGE_EXTENSION)
}

/// Full path for sequence number `n` inside `dir`
pub fn image_path(dir: &Path, n: u16) -> PathBuf {
    dir.join(image_filename(n))
}

/// Parse `IMG_NNNN.JPG` back into its sequence number
pub fn parse_image_number(name: &str) -> Option<u16> {
    let digits = name
        .strip_prefix(IMAGE_PREFIX)?
        .strip_suffix(IMAGE_EXTENSION)?
        .strip_suffix('.')?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Lowest and highest sequence numbers present in `dir`
///
/// Returns `None` when the directory is missing, unreadable, or holds no
/// matching files.
pub fn image_range(dir: &Path) -> Option<(u16, u16)> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut range: Option<(u16, u16)> = None;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(n) = name.to_str().and_then(parse_image_number) else {
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }
        range = Some(match range {
            None => (n, n),
            Some((lo, hi)) => (lo.min(n), hi.max(n)),
        });
    }

    range
}

/// Step `n` by `direction`, wrapping through 0..=9999
pub fn wrap_step(n: u16, direction: i32) -> u16 {
    (n as i64 + direction as i64).rem_euclid(SLOT_COUNT as i64) as u16
}

/// Next existing image after `from` in `direction` (+1 or -1), wrapping
///
/// May return `from` itself when it is the only image left.
pub fn next_existing(dir: &Path, from: u16, direction: i32) -> Option<u16> {
    let step = if direction < 0 { -1 } else { 1 };
    let mut n = from;
    for _ in 0..SLOT_COUNT {
        n = wrap_step(n, step);
        if image_path(dir, n).is_file() {
            return Some(n);
        }
    }
    None
}

/// Tracks the next candidate sequence number for the active storage target
///
/// Rescanning happens exactly once per target switch, even between targets
/// that share a directory; afterwards the cursor advances locally, which
/// assumes nothing else writes into the same directory.
#[derive(Debug, Clone, Default)]
pub struct ImageCursor {
    next: u16,
    scanned_for: Option<StorageTarget>,
}

impl ImageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage target the cursor was last computed for
    pub fn target(&self) -> Option<&StorageTarget> {
        self.scanned_for.as_ref()
    }

    /// Candidate number the next allocation starts probing from
    pub fn candidate(&self) -> u16 {
        self.next
    }

    /// Allocate the lowest free slot at or after the cursor in `target`'s directory
    ///
    /// Never returns a path that already exists. The cursor stays on the
    /// returned number; once that file is written the next call skips it.
    pub fn allocate(&mut self, target: &StorageTarget) -> CaptureResult<(u16, PathBuf)> {
        if self.scanned_for.as_ref() != Some(target) {
            self.rescan(target);
        }
        let dir = target.path.as_path();

        for _ in 0..SLOT_COUNT {
            let path = image_path(dir, self.next);
            if !path.exists() {
                debug!(path = %path.display(), "Allocated image slot");
                return Ok((self.next, path));
            }
            self.next = wrap_step(self.next, 1);
        }

        Err(CaptureError::NoFreeSlot(dir.to_path_buf()))
    }

    fn rescan(&mut self, target: &StorageTarget) {
        self.next = match image_range(&target.path) {
            Some((_, max)) => wrap_step(max, 1),
            None => 1,
        };
        info!(
            storage = %target.name,
            dir = %target.path.display(),
            next = self.next,
            "Scanned storage target"
        );
        self.scanned_for = Some(target.clone());
    }
}

/// Owner assigned to created directories and captured files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

impl Ownership {
    /// The invoking user when run through sudo, otherwise the process user
    pub fn from_env() -> Self {
        // SAFETY: getuid/getgid have no preconditions and cannot fail.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self {
            uid: env_id("SUDO_UID").unwrap_or(uid),
            gid: env_id("SUDO_GID").unwrap_or(gid),
        }
    }
}

fn env_id(key: &str) -> Option<u32> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Make sure `dir` exists, creating it with `owner` and mode 0755 if needed
///
/// Returns whether the directory was created. Only a failure to create the
/// directory is an error; ownership fix-up failures are logged.
pub fn ensure_directory(dir: &Path, owner: Ownership) -> CaptureResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }

    std::fs::create_dir_all(dir).map_err(|e| CaptureError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(dir = %dir.display(), "Created storage directory");
    if let Err(e) = apply_ownership(dir, owner, DIRECTORY_MODE) {
        warn!(dir = %dir.display(), error = %e, "Failed to set directory ownership");
    }
    Ok(true)
}

/// Give a captured file to `owner` with mode 0644
pub fn fix_file_ownership(path: &Path, owner: Ownership) {
    if let Err(e) = apply_ownership(path, owner, FILE_MODE) {
        warn!(path = %path.display(), error = %e, "Failed to set file ownership");
    }
}

fn apply_ownership(path: &Path, owner: Ownership, mode: u32) -> io::Result<()> {
    std::os::unix::fs::chown(path, Some(owner.uid), Some(owner.gid))?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}
