// crates/exitsim-config/src/file_layer.rs
// ============================================================================
// Module: Config File Layer
// Description: Loads `exitsim.config` as a token list.
// Purpose: Turn the config file into a configuration layer.
// Dependencies: exitsim-core
// ============================================================================

//! ## Overview
//! The config file holds one command-line token per line. Blank lines and
//! lines starting with `#` are removed; the remaining lines are parsed with
//! the command-line grammar. A missing file is an empty layer.
//!
//! Security posture: the file is untrusted input and is size-limited before
//! it is decoded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use exitsim_core::IoContext;

use crate::args::parse_layer;
use crate::config::ConfigError;
use crate::config::ConfigLayer;
use crate::config::LayerSource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default config file name, relative to the I/O root.
pub const CONFIG_FILE_NAME: &str = "exitsim.config";
/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "EXITSIM_CONFIG";
/// Maximum config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Resolves the config file path: explicit path, then env override, then
/// the default name.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Splits config file text into tokens.
#[must_use]
pub fn config_file_tokens(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Loads and parses the config file layer.
///
/// `path` is resolved against the I/O root.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, is too large, or
/// holds malformed tokens.
pub fn load_file_layer(io: &IoContext, path: &Path) -> Result<ConfigLayer, ConfigError> {
    let resolved = io.resolve(path);
    let bytes = match fs::read(&resolved) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigLayer::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: resolved,
                source,
            });
        }
    };
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::TooLarge {
            path: resolved,
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }
    let text = String::from_utf8(bytes).map_err(|err| ConfigError::Read {
        path: resolved,
        source: io::Error::new(io::ErrorKind::InvalidData, err),
    })?;
    Ok(parse_layer(config_file_tokens(&text), LayerSource::ConfigFile)?)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
