// crates/exitsim-config/src/config.rs
// ============================================================================
// Module: exitsim Configuration Model
// Description: Configuration layers, the effective configuration, and errors.
// Purpose: Define the values a run is parameterized by and their defaults.
// Dependencies: exitsim-core, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ConfigLayer`] is one parsed source of settings with every field filled
//! (unset fields carry the built-in default). An [`EffectiveConfig`] is the
//! merged result a run executes with; it is never mutated after the merge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;

use exitsim_core::GeneratorFunction;
use exitsim_core::Outcome;
use exitsim_core::WeightedOutcome;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default simulated work time in milliseconds.
pub const DEFAULT_TIME_MS: u64 = 200;
/// Default input path.
pub const DEFAULT_INPUT: &str = "./input.properties";
/// Default output path.
pub const DEFAULT_OUTPUT: &str = "./output.properties";
/// Default generator name.
pub const DEFAULT_GENERATOR: &str = "RosenbrockAdaptiveN";

/// Default behaviour: always exit with status 0.
#[must_use]
pub fn default_behaviour() -> Vec<WeightedOutcome> {
    vec![WeightedOutcome::new(1.0, Outcome::EXIT_ZERO)]
}

// ============================================================================
// SECTION: Layers
// ============================================================================

/// One parsed configuration source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigLayer {
    /// Run only with the config file, discarding the command line.
    pub ignore_command_line: bool,
    /// Print usage and exit.
    pub help: bool,
    /// Simulated work time in milliseconds.
    pub time_ms: u64,
    /// Input value-set path.
    pub input: PathBuf,
    /// Output value-set path.
    pub output: PathBuf,
    /// Ordered outcome distribution.
    pub behaviour: Vec<WeightedOutcome>,
    /// Output generator.
    pub generator: GeneratorFunction,
}

impl Default for ConfigLayer {
    fn default() -> Self {
        Self {
            ignore_command_line: false,
            help: false,
            time_ms: DEFAULT_TIME_MS,
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            behaviour: default_behaviour(),
            generator: GeneratorFunction::default(),
        }
    }
}

/// Merged configuration a run executes with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    /// Simulated work time in milliseconds.
    pub time_ms: u64,
    /// Input value-set path.
    pub input: PathBuf,
    /// Output value-set path.
    pub output: PathBuf,
    /// Ordered outcome distribution.
    pub behaviour: Vec<WeightedOutcome>,
    /// Output generator.
    pub generator: GeneratorFunction,
    /// Whether the command line was discarded.
    pub ignore_command_line: bool,
}

impl From<ConfigLayer> for EffectiveConfig {
    fn from(layer: ConfigLayer) -> Self {
        Self {
            time_ms: layer.time_ms,
            input: layer.input,
            output: layer.output,
            behaviour: layer.behaviour,
            generator: layer.generator,
            ignore_command_line: layer.ignore_command_line,
        }
    }
}

impl fmt::Display for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--time {} --input {} --output {} --generator {}",
            self.time_ms,
            self.input.display(),
            self.output.display(),
            self.generator
        )?;
        for entry in &self.behaviour {
            write!(f, " {entry}")?;
        }
        if self.ignore_command_line {
            f.write_str(" --ignore")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Source of a configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSource {
    /// Process arguments.
    CommandLine,
    /// The `exitsim.config` file.
    ConfigFile,
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => f.write_str("command-line"),
            Self::ConfigFile => f.write_str("config file"),
        }
    }
}

/// Malformed tokens in a configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {layer} arguments: {message}")]
pub struct ParseError {
    /// Layer the tokens came from.
    pub layer: LayerSource,
    /// Offending token, when one can be singled out.
    pub token: Option<String>,
    /// Description of the problem.
    pub message: String,
    /// Usage summary to show alongside the error.
    pub usage: String,
}

/// Configuration loading and parsing errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Tokens in a layer did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file exceeds the size limit.
    #[error("config file {} exceeds {limit} bytes", .path.display())]
    TooLarge {
        /// Config file path.
        path: PathBuf,
        /// Size limit in bytes.
        limit: usize,
    },
}

impl ConfigError {
    /// Returns the layer responsible for the failure.
    #[must_use]
    pub const fn layer(&self) -> LayerSource {
        match self {
            Self::Parse(error) => error.layer,
            Self::Read {
                ..
            }
            | Self::TooLarge {
                ..
            } => LayerSource::ConfigFile,
        }
    }
}
