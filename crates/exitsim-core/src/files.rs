// crates/exitsim-core/src/files.rs
// ============================================================================
// Module: File Strategies
// Description: Extension-keyed readers and writers for run input and output.
// Purpose: Read and write flat key=value value sets.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Input and output value sets are flat `key=value` text files. A strategy is
//! selected from the path's extension before any file is touched, so an
//! unsupported extension fails the run up front. Values that do not parse as
//! decimal floating point are dropped with a conversion warning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::DiagnosticSink;
use crate::io::IoContext;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Extensions accepted for input files.
pub const READABLE_EXTENSIONS: &[&str] = &["txt", "properties", "ini"];
/// Extensions accepted for output files.
pub const WRITABLE_EXTENSIONS: &[&str] = &["properties", "ini"];
/// Comment line written at the top of every output file.
pub const OUTPUT_HEADER: &str = "# exitsim simulation output";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// File strategy errors.
#[derive(Debug, Error)]
pub enum FileStrategyError {
    /// The path has no extension to select a strategy from.
    #[error("unknown file type {}", .0.display())]
    MissingExtension(PathBuf),
    /// No strategy handles the extension.
    #[error("no strategy to {direction} files with extension {extension}")]
    UnsupportedFileType {
        /// `read` or `write`.
        direction: &'static str,
        /// Offending extension.
        extension: String,
    },
    /// Filesystem failure.
    #[error("failed to {direction} {}: {source}", .path.display())]
    Io {
        /// `read` or `write`.
        direction: &'static str,
        /// Resolved path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Reads a value set from a file.
pub trait FileReader {
    /// Reads `path` (resolved against `io`) into a value set.
    ///
    /// # Errors
    ///
    /// Returns [`FileStrategyError::Io`] when the file cannot be read.
    fn read(
        &self,
        io: &IoContext,
        path: &Path,
        sink: &dyn DiagnosticSink,
    ) -> Result<BTreeMap<String, f64>, FileStrategyError>;
}

/// Writes a value set to a file.
pub trait FileWriter {
    /// Writes `values` to `path` (resolved against `io`).
    ///
    /// # Errors
    ///
    /// Returns [`FileStrategyError::Io`] when the file cannot be written.
    fn write(
        &self,
        io: &IoContext,
        values: &BTreeMap<String, f64>,
        path: &Path,
    ) -> Result<(), FileStrategyError>;
}

// ============================================================================
// SECTION: Strategy Lookup
// ============================================================================

/// Selects the reader for `path`'s extension.
///
/// # Errors
///
/// Returns [`FileStrategyError`] when the extension is missing or unsupported.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn FileReader>, FileStrategyError> {
    let extension = extension_of(path)?;
    if READABLE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(Box::new(PropertiesFile))
    } else {
        Err(FileStrategyError::UnsupportedFileType {
            direction: "read",
            extension,
        })
    }
}

/// Selects the writer for `path`'s extension.
///
/// # Errors
///
/// Returns [`FileStrategyError`] when the extension is missing or unsupported.
pub fn writer_for_path(path: &Path) -> Result<Box<dyn FileWriter>, FileStrategyError> {
    let extension = extension_of(path)?;
    if WRITABLE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(Box::new(PropertiesFile))
    } else {
        Err(FileStrategyError::UnsupportedFileType {
            direction: "write",
            extension,
        })
    }
}

/// Returns the text after the final `.` in the file name.
fn extension_of(path: &Path) -> Result<String, FileStrategyError> {
    path.extension()
        .map(|extension| extension.to_string_lossy().into_owned())
        .ok_or_else(|| FileStrategyError::MissingExtension(path.to_path_buf()))
}

// ============================================================================
// SECTION: Properties Files
// ============================================================================

/// Flat `key=value` text strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFile;

impl PropertiesFile {
    /// Parses properties text, dropping values that are not numbers.
    #[must_use]
    pub fn parse(text: &str, origin: &Path, sink: &dyn DiagnosticSink) -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, raw) = line
                .split_once(['=', ':'])
                .map_or((line, ""), |(key, value)| (key.trim(), value.trim()));
            match raw.parse::<f64>() {
                Ok(value) => {
                    values.insert(key.to_string(), value);
                }
                Err(_) => sink.record(
                    &DiagnosticEvent::warning(
                        DiagnosticKind::ConversionWarning,
                        format!("couldn't convert '{raw}' in {} to a double", origin.display()),
                    )
                    .with_field("key", key)
                    .with_field("value", raw),
                ),
            }
        }
        values
    }

    /// Renders a value set with a header comment, one sorted pair per line.
    #[must_use]
    pub fn render(values: &BTreeMap<String, f64>) -> String {
        let mut text = String::from(OUTPUT_HEADER);
        text.push('\n');
        for (key, value) in values {
            text.push_str(&format!("{key}={value}\n"));
        }
        text
    }
}

impl FileReader for PropertiesFile {
    fn read(
        &self,
        io: &IoContext,
        path: &Path,
        sink: &dyn DiagnosticSink,
    ) -> Result<BTreeMap<String, f64>, FileStrategyError> {
        let resolved = io.resolve(path);
        let bytes = fs::read(&resolved).map_err(|source| FileStrategyError::Io {
            direction: "read",
            path: resolved.clone(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes), path, sink))
    }
}

impl FileWriter for PropertiesFile {
    fn write(
        &self,
        io: &IoContext,
        values: &BTreeMap<String, f64>,
        path: &Path,
    ) -> Result<(), FileStrategyError> {
        let resolved = io.resolve(path);
        fs::write(&resolved, Self::render(values)).map_err(|source| FileStrategyError::Io {
            direction: "write",
            path: resolved,
            source,
        })
    }
}
