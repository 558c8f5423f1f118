// crates/exitsim-core/src/outcome.rs
// ============================================================================
// Module: Run Outcomes
// Description: Terminal effects of a simulated run and their weights.
// Purpose: Model outcomes as a closed sum type with stable text forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Outcome`] is either a specific exit status or a deliberate hang. A
//! [`WeightedOutcome`] pairs an outcome with the raw, un-normalized
//! probability the user asked for. Text forms match the command-line clause
//! syntax (`code:<int>`, `hang`) so diagnostics can be pasted back as flags.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Terminal effect of a simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum Outcome {
    /// Terminate the process with the given status.
    ExitCode(i32),
    /// Never terminate normally.
    Hang,
}

impl Outcome {
    /// Outcome used when no behaviour is configured.
    pub const EXIT_ZERO: Self = Self::ExitCode(0);
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitCode(code) => write!(f, "code:{code}"),
            Self::Hang => f.write_str("hang"),
        }
    }
}

// ============================================================================
// SECTION: Weighted Outcome
// ============================================================================

/// An outcome paired with its raw (un-normalized) probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedOutcome {
    /// Raw probability in `[0, inf)`; `1.0` means 100%.
    pub probability: f64,
    /// Outcome selected when this entry's range is drawn.
    pub outcome: Outcome,
}

impl WeightedOutcome {
    /// Creates a weighted outcome.
    #[must_use]
    pub const fn new(probability: f64, outcome: Outcome) -> Self {
        Self {
            probability,
            outcome,
        }
    }
}

impl fmt::Display for WeightedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--exit {}% {}", self.probability * 100.0, self.outcome)
    }
}
