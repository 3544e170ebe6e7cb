//! Client-side checks on the selected file, run on every `change` event.

use crate::config::UploadConfig;
use crate::types::{SelectedFile, SelectionError};

/// What the `change` handler does with the input's current file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionVerdict {
    /// No file picked.
    Empty,
    /// Keep the file; nothing is shown.
    Accepted(SelectedFile),
    /// Alert, then clear the input so the file is never submitted.
    Rejected(SelectionError),
}

impl SelectionVerdict {
    /// Whether the file input must be reset to empty.
    pub fn clears_input(&self) -> bool {
        matches!(self, SelectionVerdict::Rejected(_))
    }
}

/// Decide what happens to the file picked in a form's input.
pub fn review_selection(file: Option<SelectedFile>, config: &UploadConfig) -> SelectionVerdict {
    match file {
        None => SelectionVerdict::Empty,
        Some(file) => match validate_selection(&file, config) {
            Ok(()) => SelectionVerdict::Accepted(file),
            Err(e) => SelectionVerdict::Rejected(e),
        },
    }
}

/// Check a selected file against the form's extension and size rules.
///
/// The extension is checked first, so a large file with the wrong
/// extension is reported as a wrong extension.
pub fn validate_selection(file: &SelectedFile, config: &UploadConfig) -> Result<(), SelectionError> {
    let name = file.name.to_lowercase();
    let expected = config.accepted_extension.to_lowercase();

    if !name.ends_with(&expected) {
        return Err(SelectionError::InvalidFileExtension {
            name: file.name.clone(),
            expected: config.accepted_extension.clone(),
        });
    }

    if file.size > config.max_file_size {
        return Err(SelectionError::FileTooLarge {
            size: file.size,
            limit: config.max_file_size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LEGACY_MAX_FILE_SIZE, MIB};

    const MB: u64 = 1_000_000;

    #[test]
    fn test_accepts_ifc_within_limit() {
        let config = UploadConfig::default();
        assert_eq!(validate_selection(&SelectedFile::new("model.ifc", 50 * MB), &config), Ok(()));
        assert_eq!(validate_selection(&SelectedFile::new("MODEL.IFC", 1), &config), Ok(()));
        assert_eq!(validate_selection(&SelectedFile::new("tower.v2.Ifc", 0), &config), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let config = UploadConfig::default();
        for name in ["model.txt", "model.ifc.zip", "model", "ifc", "model.ifcxml"] {
            let result = validate_selection(&SelectedFile::new(name, 10), &config);
            assert_eq!(
                result,
                Err(SelectionError::InvalidFileExtension {
                    name: name.to_string(),
                    expected: ".ifc".to_string(),
                }),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_rejects_oversized_file() {
        let config = UploadConfig::default();
        let result = validate_selection(&SelectedFile::new("model.ifc", 150 * MB), &config);
        assert_eq!(
            result,
            Err(SelectionError::FileTooLarge {
                size: 150 * MB,
                limit: 100 * MIB,
            })
        );
    }

    #[test]
    fn test_limit_is_inclusive() {
        let config = UploadConfig {
            max_file_size: LEGACY_MAX_FILE_SIZE,
            ..UploadConfig::default()
        };
        assert!(validate_selection(&SelectedFile::new("a.ifc", LEGACY_MAX_FILE_SIZE), &config).is_ok());
        assert!(validate_selection(&SelectedFile::new("a.ifc", LEGACY_MAX_FILE_SIZE + 1), &config).is_err());
    }

    #[test]
    fn test_review_keeps_valid_file() {
        let config = UploadConfig::default();
        let file = SelectedFile::new("model.ifc", 50 * MB);
        let verdict = review_selection(Some(file.clone()), &config);
        assert_eq!(verdict, SelectionVerdict::Accepted(file));
        assert!(!verdict.clears_input());
        assert_eq!(review_selection(None, &config), SelectionVerdict::Empty);
    }

    #[test]
    fn test_review_clears_rejected_files() {
        let config = UploadConfig::default();

        let verdict = review_selection(Some(SelectedFile::new("model.txt", 10)), &config);
        assert!(matches!(verdict, SelectionVerdict::Rejected(SelectionError::InvalidFileExtension { .. })));
        assert!(verdict.clears_input());

        let verdict = review_selection(Some(SelectedFile::new("model.ifc", 150 * MB)), &config);
        assert!(matches!(verdict, SelectionVerdict::Rejected(SelectionError::FileTooLarge { .. })));
        assert!(verdict.clears_input());
    }

    #[test]
    fn test_extension_checked_before_size() {
        let config = UploadConfig::default();
        let result = validate_selection(&SelectedFile::new("huge.txt", 500 * MB), &config);
        assert!(matches!(result, Err(SelectionError::InvalidFileExtension { .. })));
    }
}
