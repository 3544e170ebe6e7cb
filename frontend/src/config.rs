//! Application configuration.
//!
//! Compile-time defaults for every upload form, plus [`UploadConfig`], the
//! per-form options read from the `data-ifc-upload` attribute of the host
//! form. Values missing from the attribute fall back to the constants below.

use serde::{Deserialize, Serialize};

use crate::messages::Locale;

/// One mebibyte, the unit file limits are expressed in.
pub const MIB: u64 = 1024 * 1024;

/// Maximum file size for upload (in bytes).
///
/// 100 MB limit, matching the server's request size cap.
pub const MAX_FILE_SIZE: u64 = 100 * MIB;

/// Limit used by the first deployments (16 MB).
pub const LEGACY_MAX_FILE_SIZE: u64 = 16 * MIB;

/// Extension a selected file must end with (compared case-insensitively).
pub const ACCEPTED_EXTENSION: &str = ".ifc";

/// Name of the multipart field carrying the file.
pub const FILE_FIELD_NAME: &str = "file";

/// Method used when the host form does not declare one.
pub const DEFAULT_METHOD: &str = "POST";

/// Attribute marking a form as an upload form. Its value holds the JSON options.
pub const CONFIG_ATTRIBUTE: &str = "data-ifc-upload";

/// Attribute set on a form once the controller is mounted into it.
pub const MOUNTED_ATTRIBUTE: &str = "data-ifc-upload-mounted";

/// Forms the controller attaches to on page load.
pub const UPLOAD_FORM_SELECTOR: &str = "form[data-ifc-upload], form#uploadForm";

/// Any file input, used when none carries the configured field name.
pub const FILE_INPUT_SELECTOR: &str = "input[type=file]";

/// The form's submit control.
pub const SUBMIT_SELECTOR: &str = "button[type=submit], button:not([type]), input[type=submit]";

/// Marks the element holding the progress bar. The page may provide it;
/// otherwise it is inserted right after the file input.
pub const PROGRESS_ATTRIBUTE: &str = "data-ifc-upload-progress";

/// Per-form upload options.
///
/// Deserialized from the `data-ifc-upload` attribute, e.g.
/// `data-ifc-upload='{"maxFileSize": 16777216, "locale": "en"}'`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Required file name suffix, leading dot included.
    pub accepted_extension: String,
    /// Name of the host form's file input; the first file input is used
    /// when none has this name.
    pub field_name: String,
    /// Message language. `None` follows the document's `lang`.
    pub locale: Option<Locale>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            accepted_extension: ACCEPTED_EXTENSION.to_string(),
            field_name: FILE_FIELD_NAME.to_string(),
            locale: None,
        }
    }
}

impl UploadConfig {
    /// Parse the value of the `data-ifc-upload` attribute.
    ///
    /// A missing or blank value yields the defaults. Malformed JSON is
    /// logged and also yields the defaults.
    pub fn from_attribute(value: Option<&str>) -> Self {
        let raw = match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Self::default(),
        };

        match serde_json::from_str::<UploadConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(e) => {
                log::warn!("Invalid {} value, using defaults: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }
        }
    }

    /// Ensure the extension carries its leading dot and the field name is usable.
    fn normalized(mut self) -> Self {
        let ext = self.accepted_extension.trim();
        self.accepted_extension = if ext.is_empty() {
            ACCEPTED_EXTENSION.to_string()
        } else if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };
        if self.field_name.trim().is_empty() {
            self.field_name = FILE_FIELD_NAME.to_string();
        }
        self
    }
}

/// Selector for the file input named `field_name`.
pub fn named_file_input_selector(field_name: &str) -> String {
    format!("{}[name=\"{}\"]", FILE_INPUT_SELECTOR, field_name.replace('"', "\\\""))
}

/// Human-readable size limit, e.g. `100MB`.
pub fn format_size_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}
