// crates/exitsim-core/src/collaborators.rs
// ============================================================================
// Module: Run Collaborators
// Description: Injectable work-time simulation and hang handling.
// Purpose: Keep blocking and non-returning effects behind narrow traits.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A run blocks in exactly two places: while it pretends to work, and when it
//! is told to hang. Both are traits so tests can substitute a recorder for
//! the sleep and a sentinel for the hang.
//!
//! ## Invariants
//! - [`HangHandler::hang`] never lets a run complete normally. The live
//!   handler parks the thread forever; the sentinel handler hands back
//!   [`ControlFlowHanged`] for the caller to propagate as a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Work Simulation
// ============================================================================

/// Occupies the calling thread for a requested duration.
pub trait WorkSimulator {
    /// Simulates work for `duration`.
    fn run_for(&self, duration: Duration);
}

/// Work simulator that sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepingWorkSimulator;

impl WorkSimulator for SleepingWorkSimulator {
    fn run_for(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Work simulator that records requested durations without blocking.
#[derive(Debug, Default)]
pub struct RecordingWorkSimulator {
    /// Durations requested so far, in order.
    batches: Mutex<Vec<Duration>>,
}

impl RecordingWorkSimulator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the durations requested so far.
    #[must_use]
    pub fn batches(&self) -> Vec<Duration> {
        self.batches.lock().map(|batches| batches.clone()).unwrap_or_default()
    }
}

impl WorkSimulator for RecordingWorkSimulator {
    fn run_for(&self, duration: Duration) {
        if let Ok(mut batches) = self.batches.lock() {
            batches.push(duration);
        }
    }
}

// ============================================================================
// SECTION: Hanging
// ============================================================================

/// Sentinel returned when a hang is requested where hanging is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("control flow was asked to hang in an environment where that is not allowed")]
pub struct ControlFlowHanged;

/// Handles the hang outcome.
pub trait HangHandler {
    /// Hangs. Implementations either never return or return the sentinel,
    /// which callers must treat as a non-normal termination.
    fn hang(&self) -> ControlFlowHanged;
}

/// Hang handler that parks the calling thread forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveHangHandler;

impl HangHandler for LiveHangHandler {
    fn hang(&self) -> ControlFlowHanged {
        loop {
            thread::park();
        }
    }
}

/// Hang handler that returns [`ControlFlowHanged`] immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelHangHandler;

impl HangHandler for SentinelHangHandler {
    fn hang(&self) -> ControlFlowHanged {
        ControlFlowHanged
    }
}
