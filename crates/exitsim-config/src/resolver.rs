// crates/exitsim-config/src/resolver.rs
// ============================================================================
// Module: Config Resolver
// Description: Merges the command line, config file, and defaults.
// Purpose: Produce the one effective configuration a run executes with.
// Dependencies: exitsim-core
// ============================================================================

//! ## Overview
//! Resolution reads the config file first. When the file asks to ignore the
//! command line, the process arguments are never parsed, so malformed ones
//! cannot fail the run. Otherwise each field takes the command-line value if
//! it differs from the built-in default, and the file value if not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use exitsim_core::IoContext;

use crate::args::help_text;
use crate::args::parse_layer;
use crate::config::ConfigError;
use crate::config::ConfigLayer;
use crate::config::EffectiveConfig;
use crate::config::LayerSource;
use crate::file_layer::load_file_layer;
use crate::file_layer::resolve_config_path;

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Merges parsed layers over the defaults.
#[must_use]
pub fn resolve_layers(
    cli: &ConfigLayer,
    file: &ConfigLayer,
    defaults: &ConfigLayer,
) -> EffectiveConfig {
    if file.ignore_command_line || cli.ignore_command_line {
        let mut effective = EffectiveConfig::from(file.clone());
        effective.ignore_command_line = true;
        return effective;
    }
    EffectiveConfig {
        time_ms: pick(&cli.time_ms, &file.time_ms, &defaults.time_ms),
        input: pick(&cli.input, &file.input, &defaults.input),
        output: pick(&cli.output, &file.output, &defaults.output),
        behaviour: pick(&cli.behaviour, &file.behaviour, &defaults.behaviour),
        generator: pick(&cli.generator, &file.generator, &defaults.generator),
        ignore_command_line: false,
    }
}

/// Command-line value if it is not the default, else the file value.
fn pick<T: PartialEq + Clone>(cli: &T, file: &T, default: &T) -> T {
    if cli == default { file.clone() } else { cli.clone() }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Outcome of configuration resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Run with the effective configuration.
    Run(EffectiveConfig),
    /// Print the help text and stop.
    Help(String),
}

/// Resolves the effective configuration for one run.
#[derive(Debug, Clone)]
pub struct ConfigResolver<'a> {
    /// I/O root the config file is resolved against.
    io: &'a IoContext,
    /// Config file path, relative to the I/O root unless absolute.
    config_path: PathBuf,
}

impl<'a> ConfigResolver<'a> {
    /// Creates a resolver using the default config path (or its env override).
    #[must_use]
    pub fn new(io: &'a IoContext) -> Self {
        Self {
            io,
            config_path: resolve_config_path(None),
        }
    }

    /// Overrides the config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Resolves the configuration from the process arguments.
    ///
    /// `args` excludes the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config file or the honored command
    /// line is malformed.
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Result<Resolution, ConfigError> {
        let defaults = ConfigLayer::default();
        let file = load_file_layer(self.io, &self.config_path)?;
        if file.help {
            return Ok(Resolution::Help(help_text()));
        }
        if file.ignore_command_line {
            return Ok(Resolution::Run(resolve_layers(&defaults, &file, &defaults)));
        }
        let cli = parse_layer(args, LayerSource::CommandLine)?;
        if cli.help {
            return Ok(Resolution::Help(help_text()));
        }
        Ok(Resolution::Run(resolve_layers(&cli, &file, &defaults)))
    }
}
