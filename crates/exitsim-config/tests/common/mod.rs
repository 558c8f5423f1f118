// crates/exitsim-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for resolver and layer tests.
// Purpose: Reduce duplication across integration tests for exitsim-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;

use exitsim_config::CONFIG_FILE_NAME;
use exitsim_core::IoContext;
use tempfile::TempDir;

/// Temporary I/O root with an optional config file.
pub struct Workspace {
    /// Owns the temporary directory for the test's lifetime.
    pub dir: TempDir,
    /// I/O context rooted at `dir`.
    pub io: IoContext,
}

/// Creates an empty workspace.
pub fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir");
    let io = IoContext::new(dir.path());
    Workspace {
        dir,
        io,
    }
}

/// Creates a workspace whose config file holds `lines`, one token per line.
pub fn workspace_with_config(lines: &[&str]) -> Workspace {
    let workspace = workspace();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(workspace.dir.path().join(CONFIG_FILE_NAME), text).expect("write config");
    workspace
}

/// Converts string literals into owned arguments.
pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_string()).collect()
}
