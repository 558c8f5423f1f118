// crates/exitsim-core/src/distribution.rs
// ============================================================================
// Module: Outcome Distribution
// Description: Builds exact unit-interval partitions and samples outcomes.
// Purpose: Turn imprecise user probabilities into a gap-free [0, 1] partition.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! [`build_partition`] normalizes a list of weighted outcomes and lays them
//! out as contiguous ranges over the unit interval, in source order.
//! [`Partition::sample`] resolves a uniform draw against those ranges.
//!
//! ## Invariants
//! - Every range is `[low, high)` except the last, which is `[low, 1.0]`.
//! - The last upper bound is the literal `1.0`, never an accumulated sum.
//!   Repeated addition of normalized fractions drifts (`0.01` summed a hundred
//!   times is not `1.0`), so the terminal boundary is pinned rather than
//!   computed.
//! - Entries with equal outcomes are never coalesced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::DiagnosticSink;
use crate::outcome::Outcome;
use crate::outcome::WeightedOutcome;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Allowed distance of the corrective factor from `1.0` before warning.
pub const SUM_TOLERANCE: f64 = 0.02;
/// Allowed per-entry adjustment before warning.
pub const ENTRY_TOLERANCE: f64 = 0.01;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building or sampling a partition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// A probability was negative or not finite.
    #[error("behaviour entry {index} has invalid probability {probability}")]
    InvalidProbability {
        /// Position of the entry in the behaviour list.
        index: usize,
        /// Offending probability.
        probability: f64,
    },
    /// Probabilities summed to zero, so nothing can be normalized.
    #[error("behaviour probabilities sum to {total}; at least one must be positive")]
    NonPositiveTotal {
        /// Sum of all probabilities.
        total: f64,
    },
    /// A draw fell outside every range.
    #[error("draw {draw} is outside the outcome partition")]
    DrawOutOfRange {
        /// The unmatched draw.
        draw: f64,
    },
}

// ============================================================================
// SECTION: Partition
// ============================================================================

/// One contiguous slice of the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Upper bound; exclusive except on the final range.
    pub high: f64,
    /// Outcome selected by draws in this range.
    pub outcome: Outcome,
}

impl OutcomeRange {
    /// Returns whether `draw` falls in this range.
    #[must_use]
    pub fn contains(&self, draw: f64, closed_high: bool) -> bool {
        self.low <= draw && (draw < self.high || (closed_high && draw <= self.high))
    }
}

/// Ordered, gap-free partition of `[0.0, 1.0]` into outcome ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    /// Ranges in ascending order; never empty.
    ranges: Vec<OutcomeRange>,
}

impl Partition {
    /// Partition mapping the whole interval to one outcome.
    #[must_use]
    pub fn single(outcome: Outcome) -> Self {
        Self {
            ranges: vec![OutcomeRange {
                low: 0.0,
                high: 1.0,
                outcome,
            }],
        }
    }

    /// Returns the ranges in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[OutcomeRange] {
        &self.ranges
    }

    /// Returns the number of ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false; a partition holds at least one range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the overall `(low, high)` span.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let low = self.ranges.first().map_or(0.0, |range| range.low);
        let high = self.ranges.last().map_or(1.0, |range| range.high);
        (low, high)
    }

    /// Resolves a draw in `[0, 1]` to its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::DrawOutOfRange`] when no range contains the
    /// draw. That only happens for draws outside the unit interval.
    pub fn sample(&self, draw: f64) -> Result<Outcome, DistributionError> {
        let last = self.ranges.len().saturating_sub(1);
        self.ranges
            .iter()
            .enumerate()
            .find(|(index, range)| range.contains(draw, *index == last))
            .map(|(_, range)| range.outcome)
            .ok_or(DistributionError::DrawOutOfRange {
                draw,
            })
    }

    /// Draws one uniform value from `rng` and resolves it.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::DrawOutOfRange`] if the draw misses, which
    /// a uniform `[0, 1)` source never produces.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(f64, Outcome), DistributionError> {
        let draw: f64 = rng.r#gen();
        self.sample(draw).map(|outcome| (draw, outcome))
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the outcome partition for a behaviour list.
///
/// An empty list yields `[0.0, 1.0] -> code:0`. Otherwise probabilities are
/// scaled by `1 / sum` and laid out in order; warnings go to `sink` when the
/// total or an individual entry needed noticeable adjustment.
///
/// # Errors
///
/// Returns [`DistributionError`] when a probability is negative or not finite,
/// or when the probabilities sum to zero.
pub fn build_partition(
    behaviour: &[WeightedOutcome],
    sink: &dyn DiagnosticSink,
) -> Result<Partition, DistributionError> {
    let Some((last, leading)) = behaviour.split_last() else {
        return Ok(Partition::single(Outcome::EXIT_ZERO));
    };

    for (index, entry) in behaviour.iter().enumerate() {
        if !entry.probability.is_finite() || entry.probability < 0.0 {
            return Err(DistributionError::InvalidProbability {
                index,
                probability: entry.probability,
            });
        }
    }
    let total = behaviour.iter().fold(0.0, |sum, entry| sum + entry.probability);
    if !total.is_normal() {
        return Err(DistributionError::NonPositiveTotal {
            total,
        });
    }

    let corrective_factor = 1.0 / total;
    if (corrective_factor - 1.0).abs() > SUM_TOLERANCE {
        sink.record(
            &DiagnosticEvent::warning(
                DiagnosticKind::NormalizationWarning,
                "behaviour distribution doesn't sum to 100%; it will be normalized",
            )
            .with_field("total", total)
            .with_field("corrective_factor", corrective_factor),
        );
    }

    let mut ranges = Vec::with_capacity(behaviour.len());
    let mut offset = 0.0;
    for entry in leading {
        let delta = normalized_delta(entry, corrective_factor, sink);
        ranges.push(OutcomeRange {
            low: offset,
            high: offset + delta,
            outcome: entry.outcome,
        });
        offset += delta;
    }
    normalized_delta(last, corrective_factor, sink);
    ranges.push(OutcomeRange {
        low: offset,
        high: 1.0,
        outcome: last.outcome,
    });

    Ok(Partition {
        ranges,
    })
}

/// Scales one entry and warns when it moved more than [`ENTRY_TOLERANCE`].
fn normalized_delta(
    entry: &WeightedOutcome,
    corrective_factor: f64,
    sink: &dyn DiagnosticSink,
) -> f64 {
    let delta = corrective_factor * entry.probability;
    if (delta - entry.probability).abs() > ENTRY_TOLERANCE {
        sink.record(
            &DiagnosticEvent::warning(
                DiagnosticKind::EntryAdjustedWarning,
                format!("adjusted '{entry}' to {:.2}%", delta * 100.0),
            )
            .with_field("outcome", entry.outcome.to_string())
            .with_field("probability", entry.probability)
            .with_field("normalized", delta),
        );
    }
    delta
}
