// crates/exitsim-cli/src/main.rs
// ============================================================================
// Module: exitsim Entry Point
// Description: Wires live collaborators into the execution simulator.
// Purpose: Run one simulated program execution and exit with its status.
// Dependencies: exitsim-cli, exitsim-core, rand
// ============================================================================

//! ## Overview
//! The binary resolves its I/O root from the working directory, selects a
//! diagnostic sink (stderr, or a file named by `EXITSIM_LOG`), and runs the
//! simulator with a sleeping work simulator, a parking hang handler, and an
//! entropy-seeded random source.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::io::Write;
use std::path::PathBuf;

use exitsim_cli::executor::Console;
use exitsim_cli::executor::ExecutionSimulator;
use exitsim_cli::executor::LOG_ENV_VAR;
use exitsim_cli::executor::STATUS_RUNTIME_FAILURE;
use exitsim_cli::t;
use exitsim_core::DiagnosticSink;
use exitsim_core::FileDiagnosticSink;
use exitsim_core::IoContext;
use exitsim_core::LiveHangHandler;
use exitsim_core::SleepingWorkSimulator;
use exitsim_core::StderrDiagnosticSink;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Binary entry point.
fn main() {
    let status = run();
    #[allow(clippy::exit, reason = "Exit statuses above 255 cannot be expressed via ExitCode.")]
    std::process::exit(status);
}

/// Runs the simulator and returns the process status.
fn run() -> i32 {
    let io = match IoContext::current_dir() {
        Ok(io) => io,
        Err(err) => {
            write_stderr_line(&t!("io.root_failed", error = err));
            return STATUS_RUNTIME_FAILURE;
        }
    };
    let sink = diagnostic_sink();
    let args: Vec<String> =
        env::args_os().skip(1).map(|arg| arg.to_string_lossy().into_owned()).collect();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut console = Console {
        out: &mut stdout,
        err: &mut stderr,
    };
    let mut simulator = ExecutionSimulator::new(
        &io,
        &SleepingWorkSimulator,
        &LiveHangHandler,
        sink.as_ref(),
        StdRng::from_entropy(),
    );
    match simulator.execute(args.as_slice(), &mut console) {
        Ok(status) => status,
        Err(_) => {
            write_stderr_line(&t!("run.hang_returned", status = STATUS_RUNTIME_FAILURE));
            STATUS_RUNTIME_FAILURE
        }
    }
}

/// Selects the diagnostic sink, preferring the file named by `EXITSIM_LOG`.
fn diagnostic_sink() -> Box<dyn DiagnosticSink> {
    let Some(path) = env::var_os(LOG_ENV_VAR).map(PathBuf::from) else {
        return Box::new(StderrDiagnosticSink);
    };
    match FileDiagnosticSink::new(&path) {
        Ok(sink) => Box::new(sink),
        Err(err) => {
            write_stderr_line(&t!("log.open_failed", path = path.display(), error = err));
            Box::new(StderrDiagnosticSink)
        }
    }
}

/// Writes a line to stderr, ignoring failures.
fn write_stderr_line(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "{message}");
}
