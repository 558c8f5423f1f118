// crates/exitsim-config/src/args.rs
// ============================================================================
// Module: Argument Layer
// Description: clap grammar shared by the command line and the config file.
// Purpose: Parse one token list into a fully-populated configuration layer.
// Dependencies: clap, exitsim-core
// ============================================================================

//! ## Overview
//! Both configuration layers are token lists with the same shape, so both go
//! through [`parse_layer`]. Fields that are not given carry their built-in
//! default, which lets the resolver compare values against defaults.
//! Repeating a single-value flag keeps the last value; `--exit` accumulates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::ArgAction;
use clap::CommandFactory;
use clap::Parser;
use clap::error::ContextKind;
use clap::error::ContextValue;
use exitsim_core::GeneratorError;
use exitsim_core::GeneratorFunction;

use crate::clause::ExitClauseAccumulator;
use crate::config::ConfigLayer;
use crate::config::DEFAULT_GENERATOR;
use crate::config::DEFAULT_INPUT;
use crate::config::DEFAULT_OUTPUT;
use crate::config::DEFAULT_TIME_MS;
use crate::config::LayerSource;
use crate::config::ParseError;
use crate::config::default_behaviour;

// ============================================================================
// SECTION: Grammar
// ============================================================================

/// Program name prepended to every token list.
const PROGRAM_NAME: &str = "exitsim";

/// Argument grammar for one configuration layer.
#[derive(Parser, Debug)]
#[command(
    name = PROGRAM_NAME,
    about = "Simulates a program run: reads inputs, works, writes outputs, then exits as configured.",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct ArgsLayer {
    /// Print usage and exit.
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,
    /// Use only the config file and discard the command line.
    #[arg(long = "ignore", visible_alias = "ignoreCLI", action = ArgAction::SetTrue)]
    ignore: bool,
    /// Simulated work time in milliseconds.
    #[arg(short = 't', long = "time", value_name = "MILLIS", default_value_t = DEFAULT_TIME_MS)]
    time: u64,
    /// Input value-set path.
    #[arg(short = 'i', long = "input", value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Output value-set path.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Exit behaviour entry: a percentage and `hang` or `code:<int>`. Repeatable.
    #[arg(
        short = 'e',
        long = "exit",
        num_args = 2,
        value_names = ["PERCENTAGE", "CLAUSE"],
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    exit: Vec<String>,
    /// Output generator function.
    #[arg(
        short = 'g',
        long = "generator",
        value_name = "NAME",
        default_value = DEFAULT_GENERATOR,
        value_parser = parse_generator
    )]
    generator: GeneratorFunction,
}

/// Parses a generator name for clap.
fn parse_generator(value: &str) -> Result<GeneratorFunction, GeneratorError> {
    value.parse()
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses one layer's tokens into a [`ConfigLayer`].
///
/// Empty tokens are discarded before parsing.
///
/// # Errors
///
/// Returns [`ParseError`] tagged with `layer` when the tokens are malformed.
pub fn parse_layer<I, S>(tokens: I, layer: LayerSource) -> Result<ConfigLayer, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv = std::iter::once(PROGRAM_NAME.to_string()).chain(
        tokens
            .into_iter()
            .map(|token| token.as_ref().to_string())
            .filter(|token| !token.is_empty()),
    );
    let args = ArgsLayer::try_parse_from(argv).map_err(|error| clap_parse_error(&error, layer))?;

    let mut behaviour = ExitClauseAccumulator::collect(args.exit.iter().map(String::as_str))
        .map_err(|error| ParseError {
            layer,
            token: Some(error.token().to_string()),
            message: error.to_string(),
            usage: usage_text(),
        })?;
    if behaviour.is_empty() {
        behaviour = default_behaviour();
    }

    Ok(ConfigLayer {
        ignore_command_line: args.ignore,
        help: args.help,
        time_ms: args.time,
        input: args.input,
        output: args.output,
        behaviour,
        generator: args.generator,
    })
}

/// Converts a clap error into a [`ParseError`].
fn clap_parse_error(error: &clap::Error, layer: LayerSource) -> ParseError {
    let token = [ContextKind::InvalidValue, ContextKind::InvalidArg].into_iter().find_map(|kind| {
        match error.get(kind) {
            Some(ContextValue::String(value)) => Some(value.clone()),
            _ => None,
        }
    });
    let rendered = error.render().to_string();
    let message = rendered.lines().next().unwrap_or_default();
    ParseError {
        layer,
        token,
        message: message.trim_start_matches("error: ").to_string(),
        usage: usage_text(),
    }
}

// ============================================================================
// SECTION: Usage
// ============================================================================

/// Returns the one-line usage summary.
#[must_use]
pub fn usage_text() -> String {
    ArgsLayer::command().render_usage().to_string()
}

/// Returns the full help text.
#[must_use]
pub fn help_text() -> String {
    ArgsLayer::command().render_help().to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
