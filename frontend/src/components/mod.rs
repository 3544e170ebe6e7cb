//! UI Components for the IFC upload page.
//!
//! - [`UploadForm`] - validation, submit-button state and upload flow of one host form
//! - [`ProgressBar`] - upload progress indicator
//!
//! [`mount_upload_forms`] attaches an [`UploadForm`] to every upload form
//! of the host page.

mod upload_form;
mod progress;

pub use upload_form::*;
pub use progress::*;
