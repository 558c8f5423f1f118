// crates/exitsim-core/src/io.rs
// ============================================================================
// Module: I/O Context
// Description: Explicit filesystem root for a simulated run.
// Purpose: Resolve relative paths without a process-wide mutable default.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Every relative path a run touches (config file, input, output) is resolved
//! against an [`IoContext`] root. Tests point the root at a temporary
//! directory; the binary uses the working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Filesystem root used to resolve relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoContext {
    /// Directory relative paths are joined onto.
    root: PathBuf,
}

impl IoContext {
    /// Creates a context rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Creates a context rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the working directory cannot be determined.
    pub fn current_dir() -> io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` against the root; absolute paths pass through.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}
