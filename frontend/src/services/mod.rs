//! Browser-side services used by the upload form.
//!
//! # Services
//!
//! - [`validation`] - extension and size checks on the selected file
//! - [`upload`] - multipart `XMLHttpRequest` upload with progress
//! - [`browser`] - alerts and navigation

pub mod validation;
pub mod upload;
pub mod browser;

pub use validation::*;
pub use upload::*;
pub use browser::*;
