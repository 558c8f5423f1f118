//! Generator function tests for exitsim core.
// crates/exitsim-core/tests/generators.rs
// ============================================================================
// Module: Generator Function Tests
// Description: Name lookup and Rosenbrock evaluation coverage.
// Purpose: Ensure generators select inputs deterministically and fail closed.
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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;

use exitsim_core::GeneratorError;
use exitsim_core::GeneratorFunction;
use exitsim_core::generator::OUTPUT_KEY;

fn inputs(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(key, value)| ((*key).to_string(), *value)).collect()
}

fn x1_through_x10() -> BTreeMap<String, f64> {
    (1..=10).map(|index| (format!("x{index}"), format!("0.{index}").parse().unwrap())).collect()
}

#[test]
fn names_round_trip_through_from_str() {
    for generator in GeneratorFunction::ALL {
        assert_eq!(generator.name().parse::<GeneratorFunction>(), Ok(generator));
    }
    assert_eq!(
        "Himmelblau".parse::<GeneratorFunction>(),
        Err(GeneratorError::Unknown("Himmelblau".to_string()))
    );
}

#[test]
fn adaptive_rosenbrock_uses_every_input() {
    let output = GeneratorFunction::RosenbrockAdaptiveN
        .evaluate(&inputs(&[("x1", 1.234), ("x2", 3.456)]))
        .expect("evaluate");

    let expected = 100.0 * (3.456_f64 - 1.234_f64.powi(2)).powi(2) + (1.0 - 1.234_f64).powi(2);
    assert_eq!(output.len(), 1);
    assert!((output[OUTPUT_KEY] - expected).abs() < 1e-9, "f1 = {}", output[OUTPUT_KEY]);
}

#[test]
fn adaptive_rosenbrock_of_a_single_input_is_zero() {
    let output =
        GeneratorFunction::RosenbrockAdaptiveN.evaluate(&inputs(&[("x1", 7.0)])).expect("evaluate");
    assert!(output[OUTPUT_KEY].abs() < f64::EPSILON);
}

#[test]
fn rosenbrock_minimum_is_zero_at_all_ones() {
    let all_ones = (1..=10).map(|index| (format!("x{index}"), 1.0)).collect();
    let output = GeneratorFunction::RosenbrockX1ThroughX10.evaluate(&all_ones).expect("evaluate");
    assert!(output[OUTPUT_KEY].abs() < f64::EPSILON);
}

#[test]
fn fixed_rosenbrock_evaluates_in_numeric_order() {
    let output =
        GeneratorFunction::RosenbrockX1ThroughX10.evaluate(&x1_through_x10()).expect("evaluate");
    assert!((output[OUTPUT_KEY] - 124.98).abs() < 1e-9, "f1 = {}", output[OUTPUT_KEY]);
}

#[test]
fn adaptive_rosenbrock_orders_numeric_suffixes_naturally() {
    let adaptive =
        GeneratorFunction::RosenbrockAdaptiveN.evaluate(&x1_through_x10()).expect("adaptive");
    let fixed =
        GeneratorFunction::RosenbrockX1ThroughX10.evaluate(&x1_through_x10()).expect("fixed");
    assert!((adaptive[OUTPUT_KEY] - fixed[OUTPUT_KEY]).abs() < 1e-9, "f1 = {}", adaptive[OUTPUT_KEY]);
}

#[test]
fn adaptive_rosenbrock_orders_mixed_names_by_prefix_then_number() {
    let output = GeneratorFunction::RosenbrockAdaptiveN
        .evaluate(&inputs(&[("y1", 3.0), ("x10", 2.0), ("x9", 1.0)]))
        .expect("evaluate");
    let expected = 100.0 * (2.0_f64 - 1.0).powi(2)
        + (1.0 - 1.0_f64).powi(2)
        + 100.0 * (3.0_f64 - 4.0).powi(2)
        + (1.0 - 2.0_f64).powi(2);
    assert!((output[OUTPUT_KEY] - expected).abs() < 1e-9, "f1 = {}", output[OUTPUT_KEY]);
}

#[test]
fn fixed_rosenbrock_requires_every_variable() {
    let mut values = x1_through_x10();
    values.remove("x7");
    let err = GeneratorFunction::RosenbrockX1ThroughX10.evaluate(&values).expect_err("missing");
    assert_eq!(
        err,
        GeneratorError::MissingVariable {
            generator: "RosenbrockX1ThroughX10",
            variable: "x7".to_string(),
        }
    );
}

#[test]
fn fixed_rosenbrock_rejects_extra_variables() {
    let mut values = x1_through_x10();
    values.insert("x11".to_string(), 0.5);
    let err = GeneratorFunction::RosenbrockX1ThroughX10.evaluate(&values).expect_err("extra");
    assert!(matches!(err, GeneratorError::UnexpectedVariable { variable, .. } if variable == "x11"));
}
