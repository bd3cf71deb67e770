//! Input handling for configuration files and stdin.
//!
//! The document is read fully into memory as bytes and decoded as UTF-8.
//! Decoding is the one hard failure in the pipeline; everything after it
//! tolerates malformed input.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Expected extension for configuration backups. Advisory only.
pub const CONFIG_EXTENSION: &str = "conf";

/// Errors that can occur while reading input.
#[derive(Error, Debug)]
pub enum InputError {
    /// Reading the file or stdin failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input is not valid UTF-8
    #[error("input is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// Input exceeds the configured size limit
    #[error("input is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    /// No file given and stdin is a terminal
    #[error("no input: pass a configuration file or pipe one on stdin")]
    NoInput,
}

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Short label for messages and JSON metadata.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Pick the input source from the optional file argument.
///
/// `-` selects stdin explicitly. With no argument, stdin is used only when it
/// is piped.
///
/// # Errors
///
/// Returns [`InputError::NoInput`] when there is no file and stdin is a
/// terminal.
pub fn determine_input_source(file: Option<&Path>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path == Path::new("-") => Ok(InputSource::Stdin),
        Some(path) => {
            if !has_config_extension(path) {
                tracing::debug!(path = %path.display(), "file does not have a .conf extension");
            }
            Ok(InputSource::File(path.to_path_buf()))
        }
        None if !io::stdin().is_terminal() => Ok(InputSource::Stdin),
        None => Err(InputError::NoInput),
    }
}

/// Whether `path` ends in `.conf` (case-insensitive).
pub fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CONFIG_EXTENSION))
}

/// Read the whole source into memory, enforcing an optional size limit.
///
/// # Errors
///
/// Returns an error if reading fails or the input exceeds `max_bytes`.
pub fn read_source(source: &InputSource, max_bytes: Option<u64>) -> Result<Vec<u8>, InputError> {
    let bytes = match source {
        InputSource::File(path) => {
            if let Some(limit) = max_bytes {
                let size = std::fs::metadata(path)?.len();
                if size > limit {
                    return Err(InputError::TooLarge { size, limit });
                }
            }
            std::fs::read(path)?
        }
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    if let Some(limit) = max_bytes {
        let size = bytes.len() as u64;
        if size > limit {
            return Err(InputError::TooLarge { size, limit });
        }
    }

    tracing::debug!(source = %source.label(), bytes = bytes.len(), "read input");
    Ok(bytes)
}

/// Decode bytes as UTF-8.
///
/// # Errors
///
/// Returns [`InputError::Decode`] on invalid UTF-8.
pub fn decode(bytes: &[u8]) -> Result<&str, InputError> {
    Ok(std::str::from_utf8(bytes)?)
}
