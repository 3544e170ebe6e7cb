//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Selection Types** - the file picked in an upload form
//! - **Error Types** - selection, upload and mount failures

use std::fmt;

use thiserror::Error;

// =============================================================================
// Selection Types
// =============================================================================

/// File currently chosen in a form's file input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the browser (no path)
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Snapshot of a browser `File`.
    pub fn from_file(file: &web_sys::File) -> Self {
        // File.size is a double holding a whole byte count
        Self::new(file.name(), file.size().max(0.0) as u64)
    }
}

impl fmt::Display for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Why a selected file was refused before any request was made.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The name does not end with the accepted extension.
    #[error("'{name}' does not have the {expected} extension")]
    InvalidFileExtension { name: String, expected: String },

    /// The file is larger than the configured limit.
    #[error("file is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },
}

/// Upload failures. All of them return the form to idle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Network-level failure or aborted request.
    #[error("Upload transport failure")]
    Transport,

    /// The server answered with a status other than 200 or 302.
    #[error("Upload rejected with status {status}")]
    Rejected { status: u16 },

    /// Success status, but nothing to navigate to.
    #[error("Upload response carried no location")]
    MissingLocation,

    /// The browser refused to build or send the request.
    #[error("Failed to set up upload: {0}")]
    Setup(String),

    /// The upload succeeded but the browser refused the navigation.
    #[error("Failed to navigate to {0}")]
    Navigation(String),
}

/// Why a form could not be taken over by the controller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MountError {
    /// The form has no `input[type=file]`.
    #[error("form has no file input")]
    MissingFileInput,

    /// The file input is not attached to a parent node.
    #[error("file input is detached from the document")]
    DetachedInput,

    /// A DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type alias for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
