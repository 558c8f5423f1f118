// crates/exitsim-config/src/lib.rs
// ============================================================================
// Module: exitsim Config Library
// Description: Layered configuration model and resolution.
// Purpose: Single source of truth for how flags and config files combine.
// Dependencies: clap, exitsim-core, serde, thiserror
// ============================================================================

//! ## Overview
//! `exitsim-config` parses the command line and the `exitsim.config` file with
//! the same argument grammar, then merges them against built-in defaults into
//! one [`EffectiveConfig`].
//!
//! The merge is value-based: a command-line value wins only when it differs
//! from the built-in default. Passing the default explicitly is therefore the
//! same as not passing it at all.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod clause;
pub mod config;
pub mod file_layer;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::help_text;
pub use args::parse_layer;
pub use args::usage_text;
pub use clause::ClauseError;
pub use clause::ExitClauseAccumulator;
pub use config::*;
pub use file_layer::CONFIG_ENV_VAR;
pub use file_layer::CONFIG_FILE_NAME;
pub use file_layer::config_file_tokens;
pub use file_layer::load_file_layer;
pub use file_layer::resolve_config_path;
pub use resolver::ConfigResolver;
pub use resolver::Resolution;
pub use resolver::resolve_layers;
