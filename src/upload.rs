//! File upload entry point.
//!
//! CSV is the only accepted format. Parsing is not implemented; a CSV path is
//! reported as such instead of being silently accepted.

use std::path::Path;

use crate::error::{Error, Result};
use crate::records::RecordDraft;

pub const ACCEPTED_EXTENSION: &str = "csv";

pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
}

/// Import record drafts from a file.
pub fn import_file(path: &Path) -> Result<Vec<RecordDraft>> {
    if !is_accepted(path) {
        return Err(Error::UnsupportedFileType {
            path: path.to_path_buf(),
        });
    }
    // TODO: define the CSV column contract (name, airport, grade) before parsing.
    Err(Error::UploadNotImplemented {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_csv_not_implemented() {
        let path = PathBuf::from("facilities.csv");
        assert!(matches!(
            import_file(&path),
            Err(Error::UploadNotImplemented { .. })
        ));
    }

    #[test]
    fn test_csv_extension_case_insensitive() {
        assert!(is_accepted(Path::new("FACILITIES.CSV")));
    }

    #[test]
    fn test_other_types_rejected() {
        for name in ["facilities.xlsx", "facilities", "csv"] {
            assert!(
                matches!(
                    import_file(Path::new(name)),
                    Err(Error::UnsupportedFileType { .. })
                ),
                "{} should be rejected",
                name
            );
        }
    }
}
