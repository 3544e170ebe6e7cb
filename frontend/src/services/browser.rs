//! Thin wrappers over the browser window.

use crate::types::{UploadError, UploadResult};

/// Show a blocking alert box.
pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        log::error!("Failed to show alert: {:?}", e);
    }
}

/// Navigate the current tab to `location`.
pub fn navigate(location: &str) -> UploadResult<()> {
    log::info!("➡️  Navigating to {}", location);
    gloo_utils::window()
        .location()
        .set_href(location)
        .map_err(|e| UploadError::Navigation(format!("{}: {:?}", location, e)))
}
