// SPDX-License-Identifier: GPL-3.0-only

//! Hand-off of captured files to an external upload command

use super::Uploader;
use crate::config::UploaderConfig;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Runs the configured uploader program in the background
///
/// The child is detached from the capture path: the caller never waits for
/// it, and a reaper thread only logs how it exited.
#[derive(Debug, Clone)]
pub struct ShellUploader {
    config: UploaderConfig,
}

impl ShellUploader {
    pub fn new(config: UploaderConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the uploader program for `path`
    pub fn args_for(&self, path: &Path) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(config_file) = &self.config.config_file {
            args.push(OsString::from("-f"));
            args.push(config_file.as_os_str().to_owned());
        }
        args.push(OsString::from("upload"));
        args.push(path.as_os_str().to_owned());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let remote_dir = self.config.remote_dir.trim_end_matches('/');
        args.push(OsString::from(format!("{}/{}", remote_dir, file_name)));
        args
    }
}

impl Uploader for ShellUploader {
    fn upload(&self, path: &Path) {
        let spawned = Command::new(&self.config.program)
            .args(self.args_for(path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!(
                    program = %self.config.program.display(),
                    error = %e,
                    "Failed to start uploader"
                );
                return;
            }
        };

        info!(path = %path.display(), pid = child.id(), "Upload started");
        let path = path.to_path_buf();
        let reaper = std::thread::Builder::new()
            .name("upload-reaper".to_string())
            .spawn(move || match child.wait() {
                Ok(status) if status.success() => {
                    debug!(path = %path.display(), "Upload finished");
                }
                Ok(status) => warn!(path = %path.display(), %status, "Upload failed"),
                Err(e) => warn!(path = %path.display(), error = %e, "Lost track of uploader"),
            });
        if let Err(e) = reaper {
            warn!(error = %e, "Failed to start upload reaper thread");
        }
    }
}

/// Uploader used when none is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUploader;

impl Uploader for NoUploader {
    fn upload(&self, path: &Path) {
        warn!(path = %path.display(), "Upload requested but no uploader is configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args_with_config_file() {
        let uploader = ShellUploader::new(UploaderConfig {
            program: PathBuf::from("/usr/local/bin/uploader"),
            config_file: Some(PathBuf::from("/home/pi/.uploader")),
            remote_dir: "Photos/".to_string(),
        });
        let args = uploader.args_for(Path::new("/home/pi/Photos/IMG_0012.JPG"));
        assert_eq!(
            args,
            [
                "-f",
                "/home/pi/.uploader",
                "upload",
                "/home/pi/Photos/IMG_0012.JPG",
                "Photos/IMG_0012.JPG"
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_args_without_config_file() {
        let uploader = ShellUploader::new(UploaderConfig {
            program: PathBuf::from("uploader"),
            config_file: None,
            remote_dir: "Photos".to_string(),
        });
        let args = uploader.args_for(Path::new("/tmp/IMG_0001.JPG"));
        assert_eq!(args[0], "upload");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_missing_program_is_not_fatal() {
        let uploader = ShellUploader::new(UploaderConfig {
            program: PathBuf::from("/nonexistent/uploader"),
            config_file: None,
            remote_dir: "Photos".to_string(),
        });
        uploader.upload(Path::new("/tmp/IMG_0001.JPG"));
    }
}
