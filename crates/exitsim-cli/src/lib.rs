// crates/exitsim-cli/src/lib.rs
// ============================================================================
// Module: exitsim CLI Library
// Description: Execution simulator and message catalog for the exitsim binary.
// Purpose: Keep the run pipeline testable apart from process entry.
// Dependencies: exitsim-config, exitsim-core, rand, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) wires live collaborators into the
//! [`executor::ExecutionSimulator`]. Tests drive the same simulator with a
//! recording work simulator, a sentinel hang handler, and a seeded random
//! source. All user-facing text is routed through the [`t!`] macro.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Execution pipeline for one simulated run.
pub mod executor;
/// Message catalog and translation helpers.
pub mod i18n;

#[cfg(test)]
mod tests;
