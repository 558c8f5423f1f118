// crates/exitsim-core/src/lib.rs
// ============================================================================
// Module: exitsim Core Library
// Description: Outcome distribution engine and run collaborators.
// Purpose: Provide the deterministic building blocks of a simulated worker run.
// Dependencies: rand, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `exitsim-core` holds everything a simulated worker run needs except
//! configuration: the outcome model, the partition builder and sampler,
//! the generator functions, the properties-file strategies, and the injectable
//! collaborators (work simulation, hanging, diagnostics).
//!
//! ## Invariants
//! - A [`Partition`] always covers `[0.0, 1.0]` with no gap, and its final
//!   upper bound is exactly `1.0`.
//! - Collaborators are passed in explicitly; nothing here reads process-wide
//!   mutable state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod collaborators;
pub mod diagnostics;
pub mod distribution;
pub mod files;
pub mod generator;
pub mod io;
pub mod outcome;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use collaborators::ControlFlowHanged;
pub use collaborators::HangHandler;
pub use collaborators::LiveHangHandler;
pub use collaborators::RecordingWorkSimulator;
pub use collaborators::SentinelHangHandler;
pub use collaborators::SleepingWorkSimulator;
pub use collaborators::WorkSimulator;
pub use diagnostics::DiagnosticEvent;
pub use diagnostics::DiagnosticKind;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::FileDiagnosticSink;
pub use diagnostics::RecordingDiagnosticSink;
pub use diagnostics::Severity;
pub use diagnostics::StderrDiagnosticSink;
pub use distribution::DistributionError;
pub use distribution::OutcomeRange;
pub use distribution::Partition;
pub use distribution::build_partition;
pub use files::FileReader;
pub use files::FileStrategyError;
pub use files::FileWriter;
pub use files::PropertiesFile;
pub use files::reader_for_path;
pub use files::writer_for_path;
pub use generator::GeneratorError;
pub use generator::GeneratorFunction;
pub use io::IoContext;
pub use outcome::Outcome;
pub use outcome::WeightedOutcome;
