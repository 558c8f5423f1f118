// crates/exitsim-cli/src/executor.rs
// ============================================================================
// Module: Execution Simulator
// Description: Drives one simulated run from arguments to exit status.
// Purpose: Resolve config, read inputs, work, sample an outcome, write outputs.
// Dependencies: exitsim-config, exitsim-core, rand, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`ExecutionSimulator::execute`] runs the pipeline once:
//! resolve configuration, select file strategies, read the input, simulate
//! work, sample the outcome, evaluate the generator, and write the output.
//! The sampled outcome is applied last, so a hang still leaves the output on
//! disk.
//!
//! Every collaborator is injected: the I/O root, the work simulator, the hang
//! handler, the diagnostic sink, and the random source.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use exitsim_config::ConfigError;
use exitsim_config::ConfigResolver;
use exitsim_config::EffectiveConfig;
use exitsim_config::LayerSource;
use exitsim_config::Resolution;
use exitsim_config::usage_text;
use exitsim_core::ControlFlowHanged;
use exitsim_core::DiagnosticEvent;
use exitsim_core::DiagnosticKind;
use exitsim_core::DiagnosticSink;
use exitsim_core::DistributionError;
use exitsim_core::FileStrategyError;
use exitsim_core::GeneratorError;
use exitsim_core::HangHandler;
use exitsim_core::IoContext;
use exitsim_core::Outcome;
use exitsim_core::Severity;
use exitsim_core::WorkSimulator;
use exitsim_core::build_partition;
use exitsim_core::reader_for_path;
use exitsim_core::writer_for_path;
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status for a help request or the default outcome.
pub const STATUS_SUCCESS: i32 = 0;
/// Status for malformed command-line arguments.
pub const STATUS_COMMAND_LINE_ERROR: i32 = 400;
/// Status for a malformed config file.
pub const STATUS_CONFIG_FILE_ERROR: i32 = 404;
/// Status for any other runtime failure.
pub const STATUS_RUNTIME_FAILURE: i32 = 500;
/// Environment variable naming a file to append diagnostics to.
pub const LOG_ENV_VAR: &str = "EXITSIM_LOG";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Runtime failures after configuration has resolved.
#[derive(Debug, Error)]
pub enum RunError {
    /// Input or output file handling failed.
    #[error(transparent)]
    FileStrategy(#[from] FileStrategyError),
    /// The generator rejected the inputs.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// The behaviour could not be turned into a partition.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

// ============================================================================
// SECTION: Simulator
// ============================================================================

/// Output streams a run reports to.
pub struct Console<'w> {
    /// Help text.
    pub out: &'w mut dyn Write,
    /// Errors and usage.
    pub err: &'w mut dyn Write,
}

/// Simulated program run with injected collaborators.
pub struct ExecutionSimulator<'a, R> {
    /// I/O root for the config file, input, and output.
    io: &'a IoContext,
    /// Config file override; `None` uses the default lookup.
    config_path: Option<PathBuf>,
    /// Performs the simulated work.
    work: &'a dyn WorkSimulator,
    /// Applies a sampled hang.
    hang: &'a dyn HangHandler,
    /// Receives diagnostic events.
    sink: &'a dyn DiagnosticSink,
    /// Uniform draw source for outcome sampling.
    rng: R,
}

impl<'a, R: Rng> ExecutionSimulator<'a, R> {
    /// Creates a simulator.
    pub fn new(
        io: &'a IoContext,
        work: &'a dyn WorkSimulator,
        hang: &'a dyn HangHandler,
        sink: &'a dyn DiagnosticSink,
        rng: R,
    ) -> Self {
        Self {
            io,
            config_path: None,
            work,
            hang,
            sink,
            rng,
        }
    }

    /// Overrides the config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Executes one run with `args` (excluding the program name).
    ///
    /// Returns the process exit status.
    ///
    /// # Errors
    ///
    /// Returns [`ControlFlowHanged`] when a hang was sampled and the hang
    /// handler returned.
    pub fn execute<S: AsRef<str>>(
        &mut self,
        args: &[S],
        console: &mut Console<'_>,
    ) -> Result<i32, ControlFlowHanged> {
        let mut resolver = ConfigResolver::new(self.io);
        if let Some(path) = &self.config_path {
            resolver = resolver.with_config_path(path.clone());
        }
        let config = match resolver.resolve(args) {
            Ok(Resolution::Run(config)) => config,
            Ok(Resolution::Help(text)) => {
                let _ = write!(console.out, "{text}");
                return Ok(STATUS_SUCCESS);
            }
            Err(error) => return Ok(self.report_config_error(&error, console)),
        };

        match self.run(&config) {
            Ok(Outcome::ExitCode(status)) => Ok(status),
            Ok(Outcome::Hang) => Err(self.hang.hang()),
            Err(error) => Ok(self.report_run_error(&error, console)),
        }
    }

    /// Runs the pipeline and returns the sampled outcome.
    fn run(&mut self, config: &EffectiveConfig) -> Result<Outcome, RunError> {
        self.sink.record(
            &DiagnosticEvent::new(
                DiagnosticKind::RunStarted,
                Severity::Info,
                t!("run.started", config = config),
            )
            .with_field("config", serde_json::to_value(config).unwrap_or(Value::Null))
            .with_field("root", self.io.root().display().to_string()),
        );

        let reader = reader_for_path(&config.input)?;
        let writer = writer_for_path(&config.output)?;
        let inputs = reader.read(self.io, &config.input, self.sink)?;

        self.work.run_for(Duration::from_millis(config.time_ms));

        let partition = build_partition(&config.behaviour, self.sink)?;
        let (draw, outcome) = partition.draw(&mut self.rng)?;
        self.sink.record(
            &DiagnosticEvent::new(
                DiagnosticKind::OutcomeSampled,
                Severity::Info,
                t!("run.sampled", outcome = outcome, draw = draw),
            )
            .with_field("draw", draw)
            .with_field("outcome", outcome.to_string()),
        );

        let outputs = config.generator.evaluate(&inputs)?;
        writer.write(self.io, &outputs, &config.output)?;
        Ok(outcome)
    }

    /// Reports a configuration failure and returns its status.
    fn report_config_error(&self, error: &ConfigError, console: &mut Console<'_>) -> i32 {
        let status = match error.layer() {
            LayerSource::CommandLine => STATUS_COMMAND_LINE_ERROR,
            LayerSource::ConfigFile => STATUS_CONFIG_FILE_ERROR,
        };
        let message = match error {
            ConfigError::Parse(parse) => t!("config.invalid", error = parse),
            ConfigError::Read {
                ..
            }
            | ConfigError::TooLarge {
                ..
            } => t!("config.read_failed", error = error),
        };
        let mut event = DiagnosticEvent::new(DiagnosticKind::RunFailed, Severity::Error, &message)
            .with_field("layer", error.layer().to_string())
            .with_field("status", status);
        let _ = writeln!(console.err, "{message}");
        if let ConfigError::Parse(parse) = error
            && let Some(token) = &parse.token
        {
            event = event.with_field("token", token.as_str());
            let _ = writeln!(console.err, "{}", t!("config.invalid_token", token = token));
        }
        self.sink.record(&event);
        let _ = writeln!(console.err, "{}", usage_text());
        status
    }

    /// Reports a runtime failure with its cause chain and returns 500.
    fn report_run_error(&self, error: &RunError, console: &mut Console<'_>) -> i32 {
        let causes = cause_chain(error);
        let message = t!("run.failed", error = error);
        self.sink.record(
            &DiagnosticEvent::new(DiagnosticKind::RunFailed, Severity::Error, &message)
                .with_field("causes", causes.clone())
                .with_field("status", STATUS_RUNTIME_FAILURE),
        );
        let _ = writeln!(console.err, "{message}");
        for cause in &causes {
            let _ = writeln!(console.err, "{}", t!("run.cause", cause = cause));
        }
        let _ = writeln!(console.err, "{}", usage_text());
        STATUS_RUNTIME_FAILURE
    }
}

/// Collects the messages of every error below `error` in its source chain.
fn cause_chain(error: &dyn StdError) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}
