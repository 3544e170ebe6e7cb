//! User-facing strings.
//!
//! The upload page was written for Japanese users, so Japanese is the
//! default; English is picked when the form or the document asks for it.

use serde::{Deserialize, Serialize};

use crate::config::format_size_limit;
use crate::types::SelectionError;

/// Message language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese
    #[default]
    Ja,
    /// English
    En,
}

impl Locale {
    /// Map a BCP 47 tag such as `en-US` or `ja` to a supported locale.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("en") {
            Locale::En
        } else {
            Locale::Ja
        }
    }

    /// Locale of the current document, from `<html lang="...">`.
    pub fn from_document() -> Self {
        gloo_utils::document()
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
            .map(|lang| Self::from_tag(&lang))
            .unwrap_or_default()
    }
}

/// Strings shown by one upload form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
    pub locale: Locale,
    /// Submit button label when the host button has no text.
    pub idle_label: &'static str,
    /// Submit button label while uploading.
    pub busy_label: &'static str,
    /// Generic failure alert.
    pub upload_failed: &'static str,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        match locale {
            Locale::Ja => Self {
                locale,
                idle_label: "アップロード",
                busy_label: " 処理中...",
                upload_failed: "アップロード中にエラーが発生しました。もう一度お試しください。",
            },
            Locale::En => Self {
                locale,
                idle_label: "Upload",
                busy_label: " Processing...",
                upload_failed: "An error occurred during upload. Please try again.",
            },
        }
    }

    /// Alert for a file with the wrong extension.
    pub fn invalid_extension(&self, extension: &str) -> String {
        let kind = extension.trim_start_matches('.').to_uppercase();
        match self.locale {
            Locale::Ja => format!("{}ファイルを選択してください", kind),
            Locale::En => format!("Please select an {} file ({})", kind, extension),
        }
    }

    /// Alert for a file over the size limit.
    pub fn file_too_large(&self, limit: u64) -> String {
        let limit = format_size_limit(limit);
        match self.locale {
            Locale::Ja => format!("ファイルサイズは{}以下にしてください", limit),
            Locale::En => format!("The file must be {} or smaller", limit),
        }
    }

    /// Alert matching a rejected selection.
    pub fn selection_error(&self, error: &SelectionError) -> String {
        match error {
            SelectionError::InvalidFileExtension { expected, .. } => self.invalid_extension(expected),
            SelectionError::FileTooLarge { limit, .. } => self.file_too_large(*limit),
        }
    }
}
