//! Export of a selected section as a plain-text file.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::parser::{PATH_SEPARATOR, Section};

/// MIME type of exported payloads.
pub const EXPORT_MIME: &str = "text/plain";

/// Extension appended to exported filenames.
pub const EXPORT_EXTENSION: &str = ".txt";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
    },

    #[error("invalid export filename '{0}'")]
    InvalidFilename(String),
}

/// A section body ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: String,
    pub content: String,
    pub mime: &'static str,
}

impl ExportPayload {
    pub fn from_section(section: &Section) -> Self {
        Self {
            filename: export_filename(&section.path),
            content: section.body.clone(),
            mime: EXPORT_MIME,
        }
    }
}

/// Filename for a section path: separators become `_`, plus `.txt`.
///
/// ```
/// assert_eq!(fgtree::export::export_filename("system > interface"), "system_interface.txt");
/// ```
pub fn export_filename(path: &str) -> String {
    format!("{}{}", path.replace(PATH_SEPARATOR, "_"), EXPORT_EXTENSION)
}

/// Write a payload into `dir`, replacing any existing file atomically.
///
/// # Errors
///
/// Returns an error if the filename would escape `dir` or the write fails.
pub fn write_export(dir: &Path, payload: &ExportPayload) -> Result<PathBuf, ExportError> {
    let name = payload.filename.as_str();
    if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
        return Err(ExportError::InvalidFilename(payload.filename.clone()));
    }

    std::fs::create_dir_all(dir)?;
    let target = dir.join(name);

    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(payload.content.as_bytes())?;
    temp_file.flush()?;
    temp_file
        .persist(&target)
        .map_err(|source| ExportError::Persist {
            path: target.clone(),
            source,
        })?;

    tracing::debug!(path = %target.display(), bytes = payload.content.len(), "exported section");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("system > interface"), "system_interface.txt");
        assert_eq!(export_filename("system global"), "system global.txt");
        assert_eq!(
            export_filename("vpn ipsec phase1-interface > a > b"),
            "vpn ipsec phase1-interface_a_b.txt"
        );
    }

    #[test]
    fn test_payload_from_section() {
        let parsed = parse_config("config a\nconfig b\nset x 1\nend\nend");
        let payload = ExportPayload::from_section(parsed.sections.get("a > b").unwrap());

        assert_eq!(payload.filename, "a_b.txt");
        assert_eq!(payload.content, "config b\nset x 1\nend");
        assert_eq!(payload.mime, "text/plain");
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let payload = ExportPayload {
            filename: "system_dns.txt".to_string(),
            content: "config system dns\nend".to_string(),
            mime: EXPORT_MIME,
        };

        let written = write_export(dir.path(), &payload).unwrap();
        assert_eq!(written, dir.path().join("system_dns.txt"));
        assert_eq!(
            std::fs::read_to_string(&written).unwrap(),
            "config system dns\nend"
        );
    }

    #[test]
    fn test_write_export_rejects_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let payload = ExportPayload {
            filename: "../escape.txt".to_string(),
            content: String::new(),
            mime: EXPORT_MIME,
        };

        let err = write_export(dir.path(), &payload).unwrap_err();
        assert!(matches!(err, ExportError::InvalidFilename(_)));
    }
}
