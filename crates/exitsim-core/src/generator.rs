// crates/exitsim-core/src/generator.rs
// ============================================================================
// Module: Generator Functions
// Description: Deterministic numeric evaluators that produce run output.
// Purpose: Provide the closed set of output generators selectable by name.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`GeneratorFunction`] maps the input value set to the output value set.
//! Both variants evaluate the Rosenbrock function and publish it as `f1`;
//! they differ in which inputs they consume.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Output key written by every generator.
pub const OUTPUT_KEY: &str = "f1";
/// Number of variables consumed by [`GeneratorFunction::RosenbrockX1ThroughX10`].
const FIXED_VARIABLE_COUNT: usize = 10;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Generator selection and evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// No generator is registered under the name.
    #[error("unknown generator '{0}'")]
    Unknown(String),
    /// A required input variable is absent.
    #[error("generator {generator} requires input variable '{variable}'")]
    MissingVariable {
        /// Generator name.
        generator: &'static str,
        /// Missing variable name.
        variable: String,
    },
    /// Inputs beyond the generator's fixed variable set were supplied.
    #[error("generator {generator} accepts exclusively x1 through x10, found '{variable}'")]
    UnexpectedVariable {
        /// Generator name.
        generator: &'static str,
        /// First unexpected variable name.
        variable: String,
    },
}

// ============================================================================
// SECTION: Generator Function
// ============================================================================

/// Closed set of output generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GeneratorFunction {
    /// Rosenbrock over every input, in natural name order (`x2` before `x10`).
    #[default]
    RosenbrockAdaptiveN,
    /// Rosenbrock over exactly `x1` through `x10`, in numeric order.
    RosenbrockX1ThroughX10,
}

impl GeneratorFunction {
    /// Every generator, in declaration order.
    pub const ALL: [Self; 2] = [Self::RosenbrockAdaptiveN, Self::RosenbrockX1ThroughX10];

    /// Returns the name used to select this generator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RosenbrockAdaptiveN => "RosenbrockAdaptiveN",
            Self::RosenbrockX1ThroughX10 => "RosenbrockX1ThroughX10",
        }
    }

    /// Evaluates the generator over `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the inputs do not match the variables
    /// the generator requires.
    pub fn evaluate(
        self,
        inputs: &BTreeMap<String, f64>,
    ) -> Result<BTreeMap<String, f64>, GeneratorError> {
        let value = match self {
            Self::RosenbrockAdaptiveN => rosenbrock(&natural_order_values(inputs)),
            Self::RosenbrockX1ThroughX10 => rosenbrock(&fixed_variables(self.name(), inputs)?),
        };
        Ok(BTreeMap::from([(OUTPUT_KEY.to_string(), value)]))
    }
}

impl fmt::Display for GeneratorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorFunction {
    type Err = GeneratorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|generator| generator.name() == value)
            .ok_or_else(|| GeneratorError::Unknown(value.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the input values ordered by name, comparing trailing digits
/// numerically so `x2` precedes `x10`.
fn natural_order_values(inputs: &BTreeMap<String, f64>) -> Vec<f64> {
    let mut entries: Vec<(&String, f64)> =
        inputs.iter().map(|(name, value)| (name, *value)).collect();
    entries.sort_by(|(left, _), (right, _)| {
        natural_key(left).cmp(&natural_key(right)).then_with(|| left.cmp(right))
    });
    entries.into_iter().map(|(_, value)| value).collect()
}

/// Splits a name into its prefix and numeric suffix.
fn natural_key(name: &str) -> (&str, Option<u128>) {
    let prefix = name.trim_end_matches(|ch: char| ch.is_ascii_digit());
    (prefix, name[prefix.len() ..].parse().ok())
}

/// Collects `x1..=x10` in numeric order, rejecting missing or extra keys.
fn fixed_variables(
    generator: &'static str,
    inputs: &BTreeMap<String, f64>,
) -> Result<Vec<f64>, GeneratorError> {
    let names: Vec<String> = (1..=FIXED_VARIABLE_COUNT).map(|index| format!("x{index}")).collect();
    if let Some(extra) = inputs.keys().find(|key| !names.contains(key)) {
        return Err(GeneratorError::UnexpectedVariable {
            generator,
            variable: extra.clone(),
        });
    }
    names
        .into_iter()
        .map(|name| {
            inputs.get(&name).copied().ok_or(GeneratorError::MissingVariable {
                generator,
                variable: name,
            })
        })
        .collect()
}

/// Sum of `100 (x[i+1] - x[i]^2)^2 + (1 - x[i])^2` over consecutive pairs.
fn rosenbrock(vars: &[f64]) -> f64 {
    vars.iter()
        .zip(vars.iter().skip(1))
        .fold(0.0, |sum, (current, next)| {
            sum + 100.0 * (next - current.powi(2)).powi(2) + (1.0 - current).powi(2)
        })
}
