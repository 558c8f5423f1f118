//! Partition builder tests for exitsim core.
// crates/exitsim-core/tests/partition_builder.rs
// ============================================================================
// Module: Partition Builder Tests
// Description: Range layout, normalization, and warning coverage.
// Purpose: Pin the exact ranges produced for representative behaviour lists.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::float_cmp,
    reason = "Test-only assertions and exact boundary comparisons are permitted."
)]

use exitsim_core::DiagnosticKind;
use exitsim_core::DistributionError;
use exitsim_core::Outcome;
use exitsim_core::OutcomeRange;
use exitsim_core::RecordingDiagnosticSink;
use exitsim_core::WeightedOutcome;
use exitsim_core::build_partition;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn code(probability: f64, code: i32) -> WeightedOutcome {
    WeightedOutcome::new(probability, Outcome::ExitCode(code))
}

fn range(low: f64, high: f64, code: i32) -> OutcomeRange {
    OutcomeRange {
        low,
        high,
        outcome: Outcome::ExitCode(code),
    }
}

// ============================================================================
// SECTION: Layout
// ============================================================================

#[test]
fn empty_behaviour_maps_everything_to_exit_zero() {
    let sink = RecordingDiagnosticSink::new();
    let partition = build_partition(&[], &sink).expect("partition");

    assert_eq!(partition.span(), (0.0, 1.0));
    assert_eq!(partition.ranges(), &[range(0.0, 1.0, 0)]);
    assert_eq!(partition.sample(1.0), Ok(Outcome::ExitCode(0)));
    assert!(sink.events().is_empty());
}

#[test]
fn three_even_entries_split_into_thirds() {
    let sink = RecordingDiagnosticSink::new();
    let partition =
        build_partition(&[code(0.33, 1), code(0.33, 2), code(0.33, 3)], &sink).expect("partition");

    assert_eq!(partition.span(), (0.0, 1.0));
    assert_eq!(
        partition.ranges(),
        &[
            range(0.0, 0.333_333_333_333_333_37, 1),
            range(0.333_333_333_333_333_37, 0.666_666_666_666_666_7, 2),
            range(0.666_666_666_666_666_7, 1.0, 3),
        ]
    );
}

#[test]
fn under_full_distribution_is_scaled_up() {
    let sink = RecordingDiagnosticSink::new();
    let partition = build_partition(&[code(0.30, 1), code(0.20, 2)], &sink).expect("partition");

    assert_eq!(partition.ranges(), &[range(0.0, 0.60, 1), range(0.60, 1.0, 2)]);
    assert_eq!(sink.events_of(DiagnosticKind::NormalizationWarning).len(), 1);
    assert_eq!(sink.events_of(DiagnosticKind::EntryAdjustedWarning).len(), 2);
}

#[test]
fn duplicate_outcomes_keep_separate_ranges() {
    let sink = RecordingDiagnosticSink::new();
    let partition = build_partition(&[code(0.20, 42), code(0.60, 10), code(0.20, 42)], &sink)
        .expect("partition");

    assert_eq!(
        partition.ranges(),
        &[range(0.0, 0.20, 42), range(0.20, 0.80, 10), range(0.80, 1.0, 42)]
    );
    assert!(sink.events().is_empty());
}

#[test]
fn last_bound_is_exactly_one_after_many_small_entries() {
    let sink = RecordingDiagnosticSink::new();
    let behaviour: Vec<WeightedOutcome> = (0..100).map(|index| code(0.01, index)).collect();
    let partition = build_partition(&behaviour, &sink).expect("partition");

    let accumulated = behaviour.iter().fold(0.0, |sum, entry| sum + entry.probability);
    assert_ne!(accumulated, 1.0, "summing 0.01 a hundred times drifts");
    assert_eq!(partition.len(), 100);
    assert_eq!(partition.ranges().last().map(|range| range.high), Some(1.0));
    assert_eq!(partition.sample(1.0), Ok(Outcome::ExitCode(99)));
}

#[test]
fn hang_entries_resolve_like_exit_codes() {
    let sink = RecordingDiagnosticSink::new();
    let partition = build_partition(
        &[code(0.5, 3), WeightedOutcome::new(0.5, Outcome::Hang)],
        &sink,
    )
    .expect("partition");

    assert_eq!(partition.sample(0.25), Ok(Outcome::ExitCode(3)));
    assert_eq!(partition.sample(0.5), Ok(Outcome::Hang));
    assert_eq!(partition.sample(0.999_999), Ok(Outcome::Hang));
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

#[test]
fn near_full_distribution_does_not_warn() {
    let sink = RecordingDiagnosticSink::new();
    build_partition(&[code(0.5, 1), code(0.495, 2)], &sink).expect("partition");
    assert!(sink.events().is_empty(), "unexpected warnings: {:?}", sink.events());
}

#[test]
fn adjusted_entry_warning_names_the_clause() {
    let sink = RecordingDiagnosticSink::new();
    build_partition(&[code(0.30, 7), code(0.20, 8)], &sink).expect("partition");

    let adjusted = sink.events_of(DiagnosticKind::EntryAdjustedWarning);
    assert!(adjusted[0].message.contains("code:7"), "message: {}", adjusted[0].message);
    assert!(adjusted[0].message.contains("60.00%"), "message: {}", adjusted[0].message);
}

// ============================================================================
// SECTION: Errors
// ============================================================================

#[test]
fn zero_total_is_rejected() {
    let sink = RecordingDiagnosticSink::new();
    let err = build_partition(&[code(0.0, 1), code(0.0, 2)], &sink).expect_err("zero total");
    assert_eq!(
        err,
        DistributionError::NonPositiveTotal {
            total: 0.0
        }
    );
}

#[test]
fn negative_probability_is_rejected() {
    let sink = RecordingDiagnosticSink::new();
    let err = build_partition(&[code(0.5, 1), code(-0.1, 2)], &sink).expect_err("negative");
    assert!(matches!(err, DistributionError::InvalidProbability { index: 1, .. }));
}

#[test]
fn draws_outside_the_unit_interval_miss() {
    let sink = RecordingDiagnosticSink::new();
    let partition = build_partition(&[code(1.0, 1)], &sink).expect("partition");
    assert!(partition.sample(1.5).is_err());
    assert!(partition.sample(-0.1).is_err());
}
