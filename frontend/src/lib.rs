//! IFC Converter - upload form controller (Rust/Leptos)
//!
//! A WebAssembly module for the IFC upload page. It validates the
//! selected file in the browser and uploads it with a progress bar instead
//! of a plain synchronous form submission.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  <form data-ifc-upload action=... method=post>  (host page)  │
//! │  ├── (host fields, e.g. hidden tokens)                        │
//! │  ├── <input type=file> ──change──▶ review_selection           │
//! │  ├── [data-ifc-upload-progress] ◀── UploadForm / ProgressBar  │
//! │  └── <button type=submit>  ◀── driven from UploadUiState      │
//! │  form ──submit──▶ send_form (XHR) ──▶ finish ──▶ navigate     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Defaults and per-form options
//! - [`types`] - Selected file and error types
//! - [`messages`] - User-facing strings (Japanese, English)
//! - [`state`] - Upload UI state machine
//! - [`components`] - Leptos components
//! - [`services`] - Validation, upload transport, browser helpers

use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod messages;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Selection
    SelectedFile,
    // Errors
    SelectionError, UploadError, UploadResult, MountError,
};

// Messages
pub use messages::{Locale, Messages};

// State
pub use state::{progress_percent, UploadPhase, UploadUiState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🏗️  IFC upload - attaching to upload forms");

    mount_upload_forms();
}
