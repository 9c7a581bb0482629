// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera controller

use std::fmt;
use std::path::PathBuf;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for a single capture
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Result type alias for collaborator calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Photo capture errors
    Capture(CaptureError),
    /// Device/collaborator errors outside of a capture
    Backend(BackendError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Errors raised while taking a picture
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Destination directory is missing and could not be created
    DirectoryUnavailable { path: PathBuf, reason: String },
    /// Every `IMG_NNNN` slot in the directory is taken
    NoFreeSlot(PathBuf),
    /// The camera device failed to switch modes or write the file
    Device(BackendError),
}

/// Errors reported by the external collaborators (camera, display, input)
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Collaborator is not available on this system
    NotAvailable(String),
    /// Failed to initialize
    InitializationFailed(String),
    /// Capture call failed
    CaptureFailed(String),
    /// Unsupported mode or format
    Unsupported(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Backend(e) => write!(f, "Device error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::DirectoryUnavailable { path, reason } => {
                write!(f, "Cannot use directory {}: {}", path.display(), reason)
            }
            CaptureError::NoFreeSlot(path) => {
                write!(f, "No free image number left in {}", path.display())
            }
            CaptureError::Device(e) => write!(f, "Camera failed: {}", e),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Not available: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for BackendError {}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err)
    }
}

impl From<BackendError> for CaptureError {
    fn from(err: BackendError) -> Self {
        CaptureError::Device(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

impl From<image::ImageError> for BackendError {
    fn from(err: image::ImageError) -> Self {
        BackendError::Other(err.to_string())
    }
}
